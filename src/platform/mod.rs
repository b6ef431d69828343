pub mod process;
pub mod traits;

pub use process::{QrencodeRenderer, WgKeyTool, DEFAULT_QRENCODE, DEFAULT_WG};
pub use traits::{CodeRenderer, KeyTool};
