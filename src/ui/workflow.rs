//! ui::workflow
//!
//! The interactive workflow as a pure state machine.
//!
//! # Views
//!
//! - `List`: pick an application, with a case-insensitive filter
//! - `Details`: pick one of the application's secrets by number
//! - `Form`: fill in the secret's fields, then submit
//!
//! # Design
//!
//! [`Workflow::update`] consumes the current state and an [`Event`] and
//! returns the next state plus an [`Effect`]. Nothing here touches the
//! terminal, the filesystem or `kubeseal`, so event sequences can be replayed
//! in tests. The only side effect is pre-seeding generated values when a form
//! opens.
//!
//! # Pre-seeding
//!
//! When a form opens, each input starts with:
//! 1. the field's default, if non-empty
//! 2. else a generated password, if the generator is `secure`
//! 3. else a generated API key, if the generator is `apikey`
//! 4. else nothing
//!
//! `strong` and `passphrase` are only honored when the keyword itself is the
//! submitted value.
//!
//! # Example
//!
//! ```
//! use kryptos::core::types::{AppConfig, Secret, SecretField};
//! use kryptos::ui::workflow::{Effect, Event, Key, Workflow};
//!
//! let apps = vec![AppConfig {
//!     app_name: "demo".into(),
//!     display_name: "Demo".into(),
//!     namespace: "demo-prod".into(),
//!     secrets: vec![Secret {
//!         name: "demo-admin".into(),
//!         fields: vec![SecretField::new("username")],
//!         ..Default::default()
//!     }],
//! }];
//!
//! let mut wf = Workflow::new(&apps);
//! for event in [
//!     Event::Key(Key::Enter),
//!     Event::Key(Key::Char('1')),
//!     Event::Replace("admin".into()),
//!     Event::Key(Key::Tab),
//! ] {
//!     wf = wf.update(event).unwrap().workflow;
//! }
//!
//! let transition = wf.update(Event::Key(Key::Enter)).unwrap();
//! match transition.effect {
//!     Effect::Submit(sub) => assert_eq!(sub.entered["username"], "admin"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroize;

use crate::core::types::{AppConfig, Secret, SecretField};
use crate::secrets::{self, GeneratorError, GeneratorKind};

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Esc,
    Tab,
    BackTab,
    Up,
    Down,
    /// Ctrl-C, or end of input.
    Interrupt,
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    /// Replace the text under the cursor: the list filter, the details
    /// selection, or the focused form input.
    Replace(String),
}

/// What the caller should do after a transition.
#[derive(Debug)]
pub enum Effect<'a> {
    None,
    Quit,
    Submit(Submission<'a>),
}

/// Values collected from a completed form.
///
/// `entered` holds the literal text of each input, keywords included.
/// Values are zeroized on drop.
pub struct Submission<'a> {
    pub app: &'a AppConfig,
    pub secret: &'a Secret,
    pub entered: BTreeMap<String, String>,
}

impl fmt::Debug for Submission<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("app", &self.app.app_name)
            .field("secret", &self.secret.name)
            .field("keys", &self.entered.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        for value in self.entered.values_mut() {
            value.zeroize();
        }
    }
}

/// Result of [`Workflow::update`].
#[derive(Debug)]
pub struct Transition<'a> {
    pub workflow: Workflow<'a>,
    pub effect: Effect<'a>,
}

/// Application list state. Survives trips into Details and back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub filter: String,
    /// Position within the filtered matches.
    pub cursor: usize,
}

/// One form input.
pub struct Input {
    pub name: String,
    pub prompt: String,
    pub value: String,
    pub masked: bool,
}

impl Input {
    fn seeded(field: &SecretField) -> Result<Self, GeneratorError> {
        let value = if !field.default.is_empty() {
            field.default.clone()
        } else {
            match field.generator {
                Some(kind @ (GeneratorKind::Secure | GeneratorKind::ApiKey)) => {
                    secrets::generate(kind)?
                }
                _ => String::new(),
            }
        };

        Ok(Self {
            name: field.name.clone(),
            prompt: field.prompt().to_string(),
            value,
            masked: field.is_sensitive(),
        })
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Input");
        s.field("name", &self.name).field("masked", &self.masked);
        if !self.masked {
            s.field("value", &self.value);
        }
        s.finish_non_exhaustive()
    }
}

impl Drop for Input {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// An open form.
///
/// `focus == inputs.len()` is the submit target.
#[derive(Debug)]
pub struct Form {
    pub app: usize,
    pub secret: usize,
    pub inputs: Vec<Input>,
    pub focus: usize,
}

impl Form {
    fn open(apps: &[AppConfig], app: usize, secret: usize) -> Result<Self, GeneratorError> {
        let inputs = apps[app].secrets[secret]
            .fields
            .iter()
            .map(Input::seeded)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            app,
            secret,
            inputs,
            focus: 0,
        })
    }

    /// Whether focus is on the submit target.
    pub fn on_submit(&self) -> bool {
        self.focus == self.inputs.len()
    }

    fn focused_mut(&mut self) -> Option<&mut Input> {
        self.inputs.get_mut(self.focus)
    }

    fn next(&mut self) {
        self.focus = (self.focus + 1) % (self.inputs.len() + 1);
    }

    fn prev(&mut self) {
        self.focus = match self.focus {
            0 => self.inputs.len(),
            n => n - 1,
        };
    }
}

/// The current view.
#[derive(Debug)]
pub enum View {
    List,
    Details { app: usize },
    Form(Form),
}

/// Workflow state over borrowed, immutable configurations.
#[derive(Debug)]
pub struct Workflow<'a> {
    apps: &'a [AppConfig],
    list: ListState,
    view: View,
}

impl<'a> Workflow<'a> {
    /// Start at the application list.
    pub fn new(apps: &'a [AppConfig]) -> Self {
        Self {
            apps,
            list: ListState::default(),
            view: View::List,
        }
    }

    pub fn apps(&self) -> &'a [AppConfig] {
        self.apps
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Indices of applications matching the list filter, in load order.
    pub fn matches(&self) -> Vec<usize> {
        let needle = self.list.filter.to_lowercase();
        self.apps
            .iter()
            .enumerate()
            .filter(|(_, app)| {
                needle.is_empty()
                    || app.label().to_lowercase().contains(&needle)
                    || app.app_name.to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if pre-seeding a form fails.
    pub fn update(mut self, event: Event) -> Result<Transition<'a>, GeneratorError> {
        if event == Event::Key(Key::Interrupt) {
            return Ok(self.quit());
        }

        let view = std::mem::replace(&mut self.view, View::List);
        match view {
            View::List => self.update_list(event),
            View::Details { app } => self.update_details(app, event),
            View::Form(form) => Ok(self.update_form(form, event)),
        }
    }

    fn stay(self) -> Transition<'a> {
        Transition {
            workflow: self,
            effect: Effect::None,
        }
    }

    fn quit(self) -> Transition<'a> {
        Transition {
            workflow: self,
            effect: Effect::Quit,
        }
    }

    fn select(&mut self, app: usize) {
        self.view = View::Details { app };
    }

    fn set_filter(&mut self, filter: String) {
        self.list.filter = filter;
        self.list.cursor = 0;
    }

    fn update_list(mut self, event: Event) -> Result<Transition<'a>, GeneratorError> {
        let matches = self.matches();
        match event {
            Event::Key(Key::Char('q')) if self.list.filter.is_empty() => return Ok(self.quit()),
            Event::Key(Key::Char(c)) => {
                let mut filter = std::mem::take(&mut self.list.filter);
                filter.push(c);
                self.set_filter(filter);
            }
            Event::Key(Key::Backspace) => {
                let mut filter = std::mem::take(&mut self.list.filter);
                filter.pop();
                self.set_filter(filter);
            }
            Event::Key(Key::Esc) => self.set_filter(String::new()),
            Event::Key(Key::Up | Key::BackTab) => {
                self.list.cursor = self.list.cursor.saturating_sub(1);
            }
            Event::Key(Key::Down | Key::Tab) => {
                if self.list.cursor + 1 < matches.len() {
                    self.list.cursor += 1;
                }
            }
            Event::Key(Key::Enter) => {
                if let Some(&app) = matches.get(self.list.cursor) {
                    self.select(app);
                }
            }
            Event::Replace(text) => match parse_choice(&text, matches.len()) {
                Some(n) => {
                    self.list.cursor = n;
                    self.select(matches[n]);
                }
                None => self.set_filter(text),
            },
            Event::Key(Key::Interrupt) => return Ok(self.quit()),
        }
        Ok(self.stay())
    }

    fn update_details(mut self, app: usize, event: Event) -> Result<Transition<'a>, GeneratorError> {
        let count = self.apps[app].secrets.len();
        let choice = match &event {
            Event::Key(Key::Char(c)) => parse_choice(&c.to_string(), count),
            Event::Replace(text) => parse_choice(text, count),
            _ => None,
        };

        if let Some(secret) = choice {
            self.view = View::Form(Form::open(self.apps, app, secret)?);
            return Ok(self.stay());
        }

        if event == Event::Key(Key::Esc) {
            return Ok(self.stay());
        }
        self.view = View::Details { app };
        if event == Event::Key(Key::Char('q')) {
            return Ok(self.quit());
        }
        Ok(self.stay())
    }

    fn update_form(mut self, mut form: Form, event: Event) -> Transition<'a> {
        match event {
            Event::Key(Key::Esc) => {
                self.view = View::Details { app: form.app };
                return self.stay();
            }
            Event::Key(Key::Enter) if form.on_submit() => {
                let submission = self.submission(&form);
                self.view = View::Form(form);
                return Transition {
                    workflow: self,
                    effect: Effect::Submit(submission),
                };
            }
            Event::Key(Key::Tab | Key::Down | Key::Enter) => form.next(),
            Event::Key(Key::BackTab | Key::Up) => form.prev(),
            Event::Key(Key::Char(c)) => {
                if let Some(input) = form.focused_mut() {
                    input.value.push(c);
                }
            }
            Event::Key(Key::Backspace) => {
                if let Some(input) = form.focused_mut() {
                    input.value.pop();
                }
            }
            Event::Replace(text) => {
                if let Some(input) = form.focused_mut() {
                    input.value.zeroize();
                    input.value = text;
                }
            }
            Event::Key(Key::Interrupt) => {
                self.view = View::Form(form);
                return self.quit();
            }
        }
        self.view = View::Form(form);
        self.stay()
    }

    fn submission(&self, form: &Form) -> Submission<'a> {
        let app = &self.apps[form.app];
        Submission {
            app,
            secret: &app.secrets[form.secret],
            entered: form
                .inputs
                .iter()
                .map(|input| (input.name.clone(), input.value.clone()))
                .collect(),
        }
    }
}

/// Parse a 1-based menu choice into a 0-based index below `len`.
fn parse_choice(text: &str, len: usize) -> Option<usize> {
    match text.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}
