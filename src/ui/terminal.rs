//! ui::terminal
//!
//! Line-oriented driver for the workflow.
//!
//! # Input Grammar
//!
//! Each line read from the [`LineSource`] becomes one or more events:
//!
//! | Line | Events |
//! |---|---|
//! | empty | Enter |
//! | `:up` / `:down` | Up / Down |
//! | `:next` / `:prev` | Tab / Shift-Tab |
//! | `:back` | Esc |
//! | `:quit` | Ctrl-C |
//! | `:clear` (form) | clear the focused input |
//! | `q` (list, details) | the `q` key |
//! | other text (list, details) | replace the filter or pick a number |
//! | other text (form field) | replace the focused input, then advance |
//! | other text (submit target) | ignored |
//!
//! End of input is treated as Ctrl-C.
//!
//! # Design
//!
//! The driver never changes the terminal mode, so there is nothing to
//! restore when the process exits.

use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use super::prompts::{LineSource, PromptError};
use super::render::render;
use super::workflow::{Effect, Event, Key, Submission, View, Workflow};
use crate::secrets::GeneratorError;

/// Errors from the terminal driver.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to read input: {0}")]
    Input(#[from] PromptError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// How the workflow ended.
#[derive(Debug)]
pub enum Outcome<'a> {
    Quit,
    Submit(Submission<'a>),
}

/// Where a line is being read, which decides how free text is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// The application list or a details view.
    Browse,
    /// A form input has focus.
    Field,
    /// The form's submit target has focus.
    Submit,
}

impl LineMode {
    fn of(workflow: &Workflow<'_>) -> Self {
        match workflow.view() {
            View::Form(form) if form.on_submit() => LineMode::Submit,
            View::Form(_) => LineMode::Field,
            _ => LineMode::Browse,
        }
    }
}

/// Map one input line to workflow events.
pub fn parse_line(line: &str, mode: LineMode) -> Vec<Event> {
    let command = match line.trim() {
        "" => Some(Key::Enter),
        ":up" => Some(Key::Up),
        ":down" => Some(Key::Down),
        ":next" => Some(Key::Tab),
        ":prev" => Some(Key::BackTab),
        ":back" => Some(Key::Esc),
        ":quit" => Some(Key::Interrupt),
        _ => None,
    };
    if let Some(key) = command {
        return vec![Event::Key(key)];
    }

    match mode {
        LineMode::Submit => Vec::new(),
        LineMode::Field => {
            let text = if line.trim() == ":clear" { "" } else { line };
            vec![Event::Replace(text.to_string()), Event::Key(Key::Enter)]
        }
        LineMode::Browse if line.trim() == "q" => vec![Event::Key(Key::Char('q'))],
        LineMode::Browse => vec![Event::Replace(line.trim().to_string())],
    }
}

/// Prompt text and masking for the current view.
fn prompt_for(workflow: &Workflow<'_>) -> (String, bool) {
    match workflow.view() {
        View::Form(form) => match form.inputs.get(form.focus) {
            Some(input) => (format!("{}: ", input.prompt), input.masked),
            None => ("Press enter to submit (:back to cancel): ".to_string(), false),
        },
        _ => ("> ".to_string(), false),
    }
}

/// Drive `workflow` until the operator quits or submits a form.
///
/// # Errors
///
/// - `TerminalError::Input` if reading a line fails
/// - `TerminalError::Output` if writing the rendered view fails
/// - `TerminalError::Generator` if pre-seeding a form fails
pub fn run<'a>(
    mut workflow: Workflow<'a>,
    source: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<Outcome<'a>, TerminalError> {
    loop {
        writeln!(out, "\n{}", render(&workflow))?;
        out.flush()?;

        let (prompt, masked) = prompt_for(&workflow);
        let mode = LineMode::of(&workflow);
        let events = match source.read_line(&prompt, masked)? {
            Some(line) => parse_line(&line, mode),
            None => {
                debug!("end of input");
                vec![Event::Key(Key::Interrupt)]
            }
        };

        for event in events {
            let transition = workflow.update(event)?;
            workflow = transition.workflow;
            match transition.effect {
                Effect::None => {}
                Effect::Quit => return Ok(Outcome::Quit),
                Effect::Submit(submission) => return Ok(Outcome::Submit(submission)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AppConfig, Secret, SecretField};
    use crate::ui::prompts::Scripted;

    fn apps() -> Vec<AppConfig> {
        vec![AppConfig {
            app_name: "demo".into(),
            display_name: "Demo".into(),
            namespace: "demo-prod".into(),
            secrets: vec![Secret {
                name: "demo-admin".into(),
                fields: vec![SecretField::new("username"), SecretField::new("password")],
                ..Default::default()
            }],
        }]
    }

    mod grammar {
        use super::*;

        #[test]
        fn commands_map_to_keys() {
            assert_eq!(parse_line("", LineMode::Browse), vec![Event::Key(Key::Enter)]);
            assert_eq!(parse_line(":up", LineMode::Field), vec![Event::Key(Key::Up)]);
            assert_eq!(parse_line(":down", LineMode::Browse), vec![Event::Key(Key::Down)]);
            assert_eq!(parse_line(":next", LineMode::Field), vec![Event::Key(Key::Tab)]);
            assert_eq!(parse_line(":prev", LineMode::Field), vec![Event::Key(Key::BackTab)]);
            assert_eq!(parse_line(":back", LineMode::Field), vec![Event::Key(Key::Esc)]);
            assert_eq!(parse_line(":quit", LineMode::Browse), vec![Event::Key(Key::Interrupt)]);
        }

        #[test]
        fn q_is_a_key_outside_forms_and_text_inside() {
            assert_eq!(parse_line("q", LineMode::Browse), vec![Event::Key(Key::Char('q'))]);
            assert_eq!(
                parse_line("q", LineMode::Field),
                vec![Event::Replace("q".into()), Event::Key(Key::Enter)]
            );
        }

        #[test]
        fn form_text_is_kept_verbatim() {
            assert_eq!(
                parse_line("  spaced pass ", LineMode::Field),
                vec![Event::Replace("  spaced pass ".into()), Event::Key(Key::Enter)]
            );
            assert_eq!(
                parse_line(":clear", LineMode::Field),
                vec![Event::Replace(String::new()), Event::Key(Key::Enter)]
            );
        }

        #[test]
        fn text_on_submit_target_is_ignored() {
            assert!(parse_line("no", LineMode::Submit).is_empty());
            assert!(parse_line(":clear", LineMode::Submit).is_empty());
            assert_eq!(parse_line("", LineMode::Submit), vec![Event::Key(Key::Enter)]);
            assert_eq!(parse_line(":back", LineMode::Submit), vec![Event::Key(Key::Esc)]);
        }

        #[test]
        fn list_text_is_trimmed() {
            assert_eq!(parse_line(" graf ", LineMode::Browse), vec![Event::Replace("graf".into())]);
        }
    }

    #[test]
    fn full_run_submits() {
        let apps = apps();
        let mut source = Scripted::new(["", "1", "admin", "hunter22", ""]);
        let mut out: Vec<u8> = Vec::new();

        let outcome = run(Workflow::new(&apps), &mut source, &mut out).unwrap();
        match outcome {
            Outcome::Submit(sub) => {
                assert_eq!(sub.secret.name, "demo-admin");
                assert_eq!(sub.entered["username"], "admin");
                assert_eq!(sub.entered["password"], "hunter22");
            }
            Outcome::Quit => panic!("expected submit"),
        }

        let screen = String::from_utf8(out).unwrap();
        assert!(screen.contains("Select Application"));
        assert!(screen.contains("Generating Secrets for: Demo"));
        assert!(!screen.contains("hunter22"));

        let masked: Vec<bool> = source.prompts().iter().map(|(_, m)| *m).collect();
        assert_eq!(masked, vec![false, false, false, true, false]);
    }

    #[test]
    fn stray_text_at_submit_does_not_submit() {
        let apps = apps();
        let mut source = Scripted::new(["", "1", "admin", "hunter22", "no", ":back", "q"]);
        let outcome = run(Workflow::new(&apps), &mut source, &mut Vec::<u8>::new()).unwrap();
        assert!(matches!(outcome, Outcome::Quit));
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn end_of_input_quits() {
        let apps = apps();
        let mut source = Scripted::new(["", "1", "admin"]);
        let outcome = run(Workflow::new(&apps), &mut source, &mut Vec::<u8>::new()).unwrap();
        assert!(matches!(outcome, Outcome::Quit));
    }

    #[test]
    fn q_quits_from_list() {
        let apps = apps();
        let mut source = Scripted::new(["q", "never read"]);
        let outcome = run(Workflow::new(&apps), &mut source, &mut Vec::<u8>::new()).unwrap();
        assert!(matches!(outcome, Outcome::Quit));
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn back_from_form_discards_entries() {
        let apps = apps();
        let mut source = Scripted::new(["", "1", "typed", ":back", "1", "", "", ""]);
        let outcome = run(Workflow::new(&apps), &mut source, &mut Vec::<u8>::new()).unwrap();
        match outcome {
            Outcome::Submit(sub) => assert_eq!(sub.entered["username"], ""),
            Outcome::Quit => panic!("expected submit"),
        }
    }
}
