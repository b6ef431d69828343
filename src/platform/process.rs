use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{Result, ToolError};
use crate::platform::traits::{CodeRenderer, KeyTool};

/// Default name of the WireGuard userspace tool
pub const DEFAULT_WG: &str = "wg";
/// Default name of the QR encoder
pub const DEFAULT_QRENCODE: &str = "qrencode";

/// Key material from the `wg` command line tool
#[derive(Debug, Clone)]
pub struct WgKeyTool {
    program: String,
}

impl WgKeyTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn key(&self, subcommand: &str, input: Option<&[u8]>) -> Result<Vec<u8>> {
        let key = run_piped(&self.program, &[subcommand], input)?;
        if key.iter().all(u8::is_ascii_whitespace) {
            return Err(ToolError::EmptyOutput {
                program: format!("{} {}", self.program, subcommand),
            }
            .into());
        }
        Ok(key)
    }
}

impl Default for WgKeyTool {
    fn default() -> Self {
        Self::new(DEFAULT_WG)
    }
}

impl KeyTool for WgKeyTool {
    fn generate_private_key(&self) -> Result<Vec<u8>> {
        self.key("genkey", None)
    }

    fn public_key(&self, private_key: &[u8]) -> Result<Vec<u8>> {
        self.key("pubkey", Some(private_key))
    }

    fn generate_preshared_key(&self) -> Result<Vec<u8>> {
        self.key("genpsk", None)
    }
}

/// Terminal QR codes via `qrencode -t utf8`
#[derive(Debug, Clone)]
pub struct QrencodeRenderer {
    program: String,
}

impl QrencodeRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for QrencodeRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_QRENCODE)
    }
}

impl CodeRenderer for QrencodeRenderer {
    fn render(&self, text: &str) -> Result<String> {
        let output = run_piped(&self.program, &["-t", "utf8"], Some(text.as_bytes()))?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Run `program`, feed it `input` on stdin and collect stdout
///
/// stdin is written from a separate thread so a tool that produces output
/// before draining its input cannot deadlock on a full pipe.
fn run_piped(
    program: &str,
    args: &[&str],
    input: Option<&[u8]>,
) -> std::result::Result<Vec<u8>, ToolError> {
    tracing::debug!("Running {} {}", program, args.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ToolError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdin = child.stdin.take();
    let (output, fed) = thread::scope(|s| {
        let writer = s.spawn(move || -> io::Result<()> {
            match (stdin, input) {
                (Some(mut pipe), Some(bytes)) => pipe.write_all(bytes),
                _ => Ok(()),
            }
        });
        let output = child.wait_with_output();
        let fed = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked")));
        (output, fed)
    });
    let output = output?;

    if !output.status.success() {
        return Err(ToolError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    // Only worth reporting if the tool itself was happy
    fed?;

    Ok(output.stdout)
}
