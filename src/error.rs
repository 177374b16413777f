/*!
error.rs - Error types for the host shell (CLI/image loading boundary).

The CPU core and bus never return `Result`: every opcode is total over
its inputs by construction (§7). Errors only arise at the edges, where
the outside world (a file on disk, a command-line argument) can be
wrong.
*/

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmuError {
    #[error("image is {len} bytes, which does not fit in the 64 KiB address space")]
    ImageTooLarge { len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
