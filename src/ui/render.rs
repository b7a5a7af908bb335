//! ui::render
//!
//! Plain-text rendering of workflow views.
//!
//! # Design
//!
//! Rendering is a pure function of the [`Workflow`]. Masked inputs are
//! rendered as a fixed-width placeholder so neither the value nor its length
//! reaches the screen.

use std::fmt::Write;

use super::workflow::{Form, View, Workflow};

/// Placeholder for masked values.
pub const MASK: &str = "••••••••";

/// Marker for the focused row.
const FOCUS: &str = ">";

/// Render the current view.
pub fn render(workflow: &Workflow<'_>) -> String {
    match workflow.view() {
        View::List => render_list(workflow),
        View::Details { app } => render_details(workflow, *app),
        View::Form(form) => render_form(workflow, form),
    }
}

fn marker(focused: bool) -> &'static str {
    if focused {
        FOCUS
    } else {
        " "
    }
}

fn render_list(workflow: &Workflow<'_>) -> String {
    let apps = workflow.apps();
    let list = workflow.list();
    let matches = workflow.matches();

    let mut out = String::from("Select Application\n");
    if !list.filter.is_empty() {
        let _ = writeln!(out, "Filter: {}", list.filter);
    }
    out.push('\n');

    if matches.is_empty() {
        out.push_str("  No matching applications.\n");
    }
    for (pos, &index) in matches.iter().enumerate() {
        let app = &apps[index];
        let _ = writeln!(
            out,
            "{} {}. {}\n     Namespace: {}",
            marker(pos == list.cursor),
            pos + 1,
            app.label(),
            app.namespace
        );
    }

    out.push_str("\nType a number or press enter to select, text to filter, 'q' to quit.\n");
    out
}

fn render_details(workflow: &Workflow<'_>, app: usize) -> String {
    let app = &workflow.apps()[app];

    let mut out = format!("Generating Secrets for: {}\n\nAvailable Secrets:\n", app.label());
    for (i, secret) in app.secrets.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({})",
            i + 1,
            secret.label(),
            secret.effective_type()
        );
        if !secret.description.is_empty() {
            let _ = writeln!(out, "     {}", secret.description);
        }
    }

    out.push_str("\nType the number of the secret to generate it.\n");
    out.push_str("\nPress 'esc' to go back, 'q' to quit.\n");
    out
}

fn render_form(workflow: &Workflow<'_>, form: &Form) -> String {
    let secret = &workflow.apps()[form.app].secrets[form.secret];

    let mut out = format!("Enter Secrets: {}\n\n", secret.label());
    for (i, input) in form.inputs.iter().enumerate() {
        let shown = if input.masked && !input.value.is_empty() {
            MASK
        } else {
            input.value.as_str()
        };
        let _ = writeln!(out, "{} {}: {}", marker(i == form.focus), input.prompt, shown);
    }

    let _ = writeln!(out, "\n{} [ Submit ]", marker(form.on_submit()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AppConfig, Secret, SecretField};
    use crate::ui::workflow::{Event, Key};

    fn apps() -> Vec<AppConfig> {
        vec![
            AppConfig {
                app_name: "grafana".into(),
                display_name: "Grafana".into(),
                namespace: "monitoring".into(),
                secrets: vec![Secret {
                    name: "grafana-admin".into(),
                    display_name: "Admin credentials".into(),
                    description: "Login for the admin user".into(),
                    fields: vec![
                        SecretField::new("username"),
                        SecretField {
                            prompt: "Admin password".into(),
                            ..SecretField::new("password")
                        },
                    ],
                    ..Default::default()
                }],
            },
            AppConfig {
                app_name: "traefik".into(),
                display_name: String::new(),
                namespace: "ingress".into(),
                secrets: vec![],
            },
        ]
    }

    fn step<'a>(wf: Workflow<'a>, event: Event) -> Workflow<'a> {
        wf.update(event).unwrap().workflow
    }

    #[test]
    fn list_shows_labels_and_namespaces() {
        let apps = apps();
        let out = render(&Workflow::new(&apps));
        assert!(out.contains("Select Application"));
        assert!(out.contains("> 1. Grafana"));
        assert!(out.contains("  2. traefik"));
        assert!(out.contains("Namespace: monitoring"));
    }

    #[test]
    fn list_shows_filter_and_empty_state() {
        let apps = apps();
        let wf = step(Workflow::new(&apps), Event::Replace("nothing".into()));
        let out = render(&wf);
        assert!(out.contains("Filter: nothing"));
        assert!(out.contains("No matching applications"));
    }

    #[test]
    fn details_numbers_secrets_with_type() {
        let apps = apps();
        let wf = step(Workflow::new(&apps), Event::Key(Key::Enter));
        let out = render(&wf);
        assert!(out.contains("Generating Secrets for: Grafana"));
        assert!(out.contains("1. Admin credentials (Opaque)"));
        assert!(out.contains("Login for the admin user"));
    }

    #[test]
    fn form_masks_sensitive_values() {
        let apps = apps();
        let mut wf = Workflow::new(&apps);
        for event in [
            Event::Key(Key::Enter),
            Event::Key(Key::Char('1')),
            Event::Replace("admin".into()),
            Event::Key(Key::Tab),
            Event::Replace("hunter22".into()),
        ] {
            wf = step(wf, event);
        }

        let out = render(&wf);
        assert!(out.contains("  username: admin"));
        assert!(out.contains("> Admin password: ••••••••"));
        assert!(!out.contains("hunter22"));
        assert!(out.contains("  [ Submit ]"));
    }

    #[test]
    fn form_marks_submit_focus() {
        let apps = apps();
        let mut wf = Workflow::new(&apps);
        for event in [
            Event::Key(Key::Enter),
            Event::Key(Key::Char('1')),
            Event::Key(Key::BackTab),
        ] {
            wf = step(wf, event);
        }
        assert!(render(&wf).contains("> [ Submit ]"));
    }
}
