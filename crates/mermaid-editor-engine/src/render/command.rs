use std::io::{self, ErrorKind, Write};
use std::process::{Command, Output, Stdio};
use std::thread;

use crate::render::{RenderError, Renderer};

/// Renders by piping the source to an external command and reading SVG
/// markup from its stdout.
///
/// ```rust,no_run
/// # use mermaid_editor_engine::render::{CommandRenderer, Renderer};
/// let mmdc = CommandRenderer::new("mmdc", ["-i", "-", "-o", "-", "-e", "svg"]);
/// let svg = mmdc.render("graph TD\nA-->B").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from its own thread while this one drains stdout and
        // stderr, otherwise a renderer that echoes large input blocks on a
        // full pipe
        let output = thread::scope(|scope| -> io::Result<Output> {
            let writer = child.stdin.take().map(|mut stdin| {
                scope.spawn(move || match stdin.write_all(source.as_bytes()) {
                    // The exit status reports why the renderer stopped reading
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                    result => result,
                })
            });

            let output = child.wait_with_output()?;
            if let Some(writer) = writer {
                writer
                    .join()
                    .map_err(|_| io::Error::other("stdin writer panicked"))??;
            }
            Ok(output)
        })?;
        if !output.status.success() {
            return Err(RenderError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let svg = String::from_utf8(output.stdout)?;
        if !svg.contains("<svg") {
            return Err(RenderError::NotSvg);
        }
        Ok(svg)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandRenderer {
        CommandRenderer::new("sh", ["-c", script])
    }

    #[test]
    fn returns_stdout_as_svg() {
        let svg = sh("cat").render("<svg>graph</svg>").unwrap();
        assert_eq!(svg, "<svg>graph</svg>");
    }

    #[test]
    fn large_input_round_trips_through_pipes() {
        let source = format!("<svg>{}</svg>", "x".repeat(400_000));
        let svg = sh("cat").render(&source).unwrap();
        assert_eq!(svg.len(), source.len());
        assert_eq!(svg, source);
    }

    #[test]
    fn renderer_that_ignores_stdin_still_succeeds() {
        let source = "y".repeat(400_000);
        let svg = sh("echo '<svg/>'").render(&source).unwrap();
        assert_eq!(svg.trim(), "<svg/>");
    }

    #[test]
    fn non_svg_output_is_an_error() {
        let err = sh("cat").render("graph TD").unwrap_err();
        assert!(matches!(err, RenderError::NotSvg));
    }

    #[test]
    fn failing_command_reports_stderr() {
        let err = sh("cat >/dev/null; echo 'Parse error on line 2' >&2; exit 3")
            .render("graph TD\nA-->")
            .unwrap_err();
        match err {
            RenderError::Failed { status, stderr } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "Parse error on line 2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = CommandRenderer::new("mermaid-editor-no-such-renderer", Vec::<String>::new())
            .render("graph TD")
            .unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }));
        assert!(err.to_string().contains("mermaid-editor-no-such-renderer"));
    }
}
