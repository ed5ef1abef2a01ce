//! The provisioning flow.
//!
//! Three phases run strictly in order, each at most once:
//! 1. store bootstrap: make sure the credential file exists, or abort;
//! 2. registration loop: prompt for users and append their records;
//! 3. directory pass: optionally create one directory per stored user.
//!
//! The first error ends the run. Lines and directories written before
//! the failure are left in place.

use crate::error::{ProvisionError, Result};
use crate::record::CredentialRecord;
use crate::store::{DirectoryCreator, LineStore};
use crate::ui::Prompter;
use log::{debug, info};

pub const ADD_USER_HEADING: &str = "--- Add user ---";
pub const ADD_ANOTHER_QUESTION: &str = "Add another user? (y/n)";
pub const CREATE_DIRECTORIES_QUESTION: &str =
    "Do you wish to create the required directories now? (y/n)";
pub const RELOCATION_NOTE: &str = "To save the uploaded files in another directory, \
move the user and tmp folders to the respective target directory.";

/// What a completed directory pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Directories created by this pass.
    pub created: usize,
    /// Records whose directory was already present.
    pub existing: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operator declined to create a missing store.
    Aborted,
    Completed {
        registered: usize,
        /// `None` when the directory pass was declined.
        provisioned: Option<ProvisionReport>,
    },
}

/// Drives the dialogue against an injected prompter, store and
/// directory creator.
pub struct Provisioner<P, S, D> {
    prompter: P,
    store: S,
    dirs: D,
    store_name: String,
}

impl<P, S, D> Provisioner<P, S, D>
where
    P: Prompter,
    S: LineStore,
    D: DirectoryCreator,
{
    /// `store_name` is how the credential file is named in prompts.
    pub fn new(prompter: P, store: S, dirs: D, store_name: impl Into<String>) -> Self {
        Provisioner {
            prompter,
            store,
            dirs,
            store_name: store_name.into(),
        }
    }

    pub fn into_parts(self) -> (P, S, D) {
        (self.prompter, self.store, self.dirs)
    }

    /// Run all three phases.
    pub fn run(&mut self) -> Result<Outcome> {
        if !self.bootstrap()? {
            info!("store creation declined, nothing to do");
            return Ok(Outcome::Aborted);
        }
        let registered = self.register_users()?;
        let provisioned = self.provision_directories()?;
        Ok(Outcome::Completed {
            registered,
            provisioned,
        })
    }

    /// Make sure the store exists. Returns `false` if it is missing and the
    /// operator declined to create it; nothing is touched in that case.
    pub fn bootstrap(&mut self) -> Result<bool> {
        if self.store.exists() {
            debug!("store {} already present", self.store_name);
            return Ok(true);
        }
        let question = format!(
            "The file {} does not exist. Should it be created now? (y/n)",
            self.store_name
        );
        if !self.prompter.confirm(&question)? {
            return Ok(false);
        }
        self.store.create()?;
        info!("created credential store {}", self.store_name);
        Ok(true)
    }

    /// Prompt for users until the operator stops. Each record is appended
    /// before the next question. Returns how many records were written.
    pub fn register_users(&mut self) -> Result<usize> {
        let mut registered = 0;
        loop {
            self.prompter.heading(ADD_USER_HEADING);
            let name = self.prompter.ask("name")?;
            let password = self.prompter.ask("password")?;

            let record = CredentialRecord::new(&name, &password);
            self.store.append_line(&record.to_line())?;
            registered += 1;
            info!("registered user {:?}", record.username);

            if !self.prompter.confirm(ADD_ANOTHER_QUESTION)? {
                break;
            }
        }
        Ok(registered)
    }

    /// Ask whether to create user directories and, if so, walk the store.
    /// Returns `None` when declined.
    pub fn provision_directories(&mut self) -> Result<Option<ProvisionReport>> {
        if !self.prompter.confirm(CREATE_DIRECTORIES_QUESTION)? {
            debug!("directory pass skipped");
            return Ok(None);
        }
        let report = self.create_missing_directories()?;
        self.prompter.say(RELOCATION_NOTE);
        Ok(Some(report))
    }

    /// Ensure a directory exists for every username in the store.
    pub fn create_missing_directories(&mut self) -> Result<ProvisionReport> {
        let mut report = ProvisionReport::default();
        for (idx, line) in self.store.read_lines()?.iter().enumerate() {
            let record = CredentialRecord::parse(line, idx + 1)?;
            if record.username.is_empty() {
                return Err(ProvisionError::InvalidDirectoryName(record.username));
            }
            if self.dirs.exists(&record.username) {
                report.existing += 1;
                continue;
            }
            self.dirs.create(&record.username)?;
            info!("created directory for {:?}", record.username);
            report.created += 1;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::is_digest;
    use std::collections::{BTreeSet, VecDeque};
    use std::io;

    #[derive(Default)]
    struct ScriptedPrompter {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
        said: Vec<String>,
    }

    impl ScriptedPrompter {
        fn with(answers: &[&'static str]) -> Self {
            ScriptedPrompter {
                answers: answers.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, prompt: &str) -> Result<String> {
            self.asked.push(prompt.to_string());
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted").into())
        }

        fn say(&mut self, message: &str) {
            self.said.push(message.to_string());
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        lines: Option<Vec<String>>,
    }

    impl MemoryStore {
        fn existing(lines: &[&str]) -> Self {
            MemoryStore {
                lines: Some(lines.iter().map(|l| format!("{l}\n")).collect()),
            }
        }

        fn content(&self) -> Vec<String> {
            self.lines.clone().unwrap_or_default()
        }
    }

    impl LineStore for MemoryStore {
        fn exists(&self) -> bool {
            self.lines.is_some()
        }

        fn create(&mut self) -> Result<()> {
            self.lines = Some(Vec::new());
            Ok(())
        }

        fn append_line(&mut self, line: &str) -> Result<()> {
            match self.lines.as_mut() {
                Some(lines) => {
                    lines.push(line.to_string());
                    Ok(())
                }
                None => Err(ProvisionError::io(
                    "open",
                    "users.csv",
                    io::Error::from(io::ErrorKind::NotFound),
                )),
            }
        }

        fn read_lines(&self) -> Result<Vec<String>> {
            Ok(self
                .content()
                .iter()
                .map(|l| l.trim_end_matches('\n').to_string())
                .collect())
        }
    }

    #[derive(Default)]
    struct MemoryDirs {
        present: BTreeSet<String>,
        created: Vec<String>,
    }

    impl DirectoryCreator for MemoryDirs {
        fn exists(&self, name: &str) -> bool {
            self.present.contains(name)
        }

        fn create(&mut self, name: &str) -> Result<()> {
            self.present.insert(name.to_string());
            self.created.push(name.to_string());
            Ok(())
        }
    }

    fn provisioner(
        answers: &[&'static str],
        store: MemoryStore,
    ) -> Provisioner<ScriptedPrompter, MemoryStore, MemoryDirs> {
        Provisioner::new(
            ScriptedPrompter::with(answers),
            store,
            MemoryDirs::default(),
            "users.csv",
        )
    }

    #[test]
    fn declining_bootstrap_aborts_without_creating_store() {
        let mut p = provisioner(&["n"], MemoryStore::default());
        assert_eq!(p.run().unwrap(), Outcome::Aborted);

        let (prompter, store, dirs) = p.into_parts();
        assert!(!store.exists());
        assert!(dirs.created.is_empty());
        assert_eq!(
            prompter.asked,
            vec!["The file users.csv does not exist. Should it be created now? (y/n)"]
        );
    }

    #[test]
    fn existing_store_skips_bootstrap_question() {
        let mut p = provisioner(&["dave", "pw", "n", "n"], MemoryStore::existing(&[]));
        let outcome = p.run().unwrap();
        assert_eq!(
            outcome,
            Outcome::Completed {
                registered: 1,
                provisioned: None
            }
        );
        let (prompter, _, _) = p.into_parts();
        assert_eq!(prompter.asked[0], "name");
    }

    #[test]
    fn alice_scenario() {
        let mut p = provisioner(&["y", "alice", "secret1", "n", "y"], MemoryStore::default());
        let outcome = p.run().unwrap();
        assert_eq!(
            outcome,
            Outcome::Completed {
                registered: 1,
                provisioned: Some(ProvisionReport {
                    created: 1,
                    existing: 0
                }),
            }
        );

        let (prompter, store, dirs) = p.into_parts();
        let lines = store.content();
        assert_eq!(lines.len(), 1);
        let (digest, rest) = lines[0].split_once(';').unwrap();
        assert!(is_digest(digest));
        assert_eq!(rest, "alice\n");
        assert_eq!(dirs.created, vec!["alice"]);
        assert_eq!(prompter.said.last().map(String::as_str), Some(RELOCATION_NOTE));
    }

    #[test]
    fn registrations_are_appended_in_order() {
        let mut p = provisioner(
            &["a", "1", "y", "b", "2", "yes", "c", "3", "no"],
            MemoryStore::existing(&[]),
        );
        assert_eq!(p.register_users().unwrap(), 3);
        let (_, store, _) = p.into_parts();
        let names: Vec<_> = store
            .content()
            .iter()
            .map(|l| CredentialRecord::parse(l, 0).unwrap().username)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_name_and_password_are_accepted() {
        let mut p = provisioner(&["", "", "n"], MemoryStore::existing(&[]));
        assert_eq!(p.register_users().unwrap(), 1);
        let (_, store, _) = p.into_parts();
        assert_eq!(store.content()[0], CredentialRecord::new("", "").to_line());
    }

    #[test]
    fn duplicate_names_are_kept() {
        let mut p = provisioner(
            &["alice", "one", "y", "alice", "two", "n", "y"],
            MemoryStore::existing(&[]),
        );
        let outcome = p.run().unwrap();
        assert_eq!(
            outcome,
            Outcome::Completed {
                registered: 2,
                provisioned: Some(ProvisionReport {
                    created: 1,
                    existing: 1
                }),
            }
        );
        let (_, store, dirs) = p.into_parts();
        let lines = store.content();
        assert_eq!(lines.len(), 2);
        assert_ne!(lines[0], lines[1]);
        assert_eq!(dirs.created, vec!["alice"]);
    }

    #[test]
    fn directory_pass_is_idempotent() {
        let store = MemoryStore::existing(&["aaa;alice", "bbb;bob"]);
        let mut p = provisioner(&[], store);
        let first = p.create_missing_directories().unwrap();
        let second = p.create_missing_directories().unwrap();
        assert_eq!(first, ProvisionReport { created: 2, existing: 0 });
        assert_eq!(second, ProvisionReport { created: 0, existing: 2 });
    }

    #[test]
    fn declined_directory_pass_has_no_effect() {
        let mut p = provisioner(&["nah"], MemoryStore::existing(&["aaa;alice"]));
        assert_eq!(p.provision_directories().unwrap(), None);
        let (prompter, _, dirs) = p.into_parts();
        assert!(dirs.created.is_empty());
        assert!(prompter.said.is_empty());
    }

    #[test]
    fn malformed_line_stops_the_pass() {
        let store = MemoryStore::existing(&["aaa;alice", "garbage", "ccc;carol"]);
        let mut p = provisioner(&["y"], store);
        let err = p.provision_directories().unwrap_err();
        assert!(matches!(err, ProvisionError::MalformedRecord { line: 2, .. }));

        // Work done before the failure stays.
        let (prompter, _, dirs) = p.into_parts();
        assert_eq!(dirs.created, vec!["alice"]);
        assert!(prompter.said.is_empty());
    }

    #[test]
    fn empty_username_is_rejected_in_directory_pass() {
        let mut p = provisioner(&[], MemoryStore::existing(&["aaa;"]));
        let err = p.create_missing_directories().unwrap_err();
        assert!(matches!(err, ProvisionError::InvalidDirectoryName(ref n) if n.is_empty()));
    }

    #[test]
    fn prompt_failure_is_surfaced() {
        let mut p = provisioner(&["y", "alice"], MemoryStore::default());
        let err = p.run().unwrap_err();
        assert!(matches!(err, ProvisionError::Prompt(_)));
        let (_, store, _) = p.into_parts();
        assert!(store.exists());
        assert!(store.content().is_empty());
    }
}
