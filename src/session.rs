//! One working session over a data directory: load, relink, operate, save.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::registry::Registry;

pub struct Session {
    data_dir: PathBuf,
    config: Config,
    registry: Registry,
    advisories: Vec<String>,
    /// Repositories that must not be written: their file failed to load, or
    /// their links point into one that did.
    unsaved: Vec<&'static str>,
}

impl Session {
    /// Open the data directory.
    ///
    /// Only a broken `aula.toml` is an error. A data file that cannot be read
    /// leaves its repository empty and is reported through [`Session::advisories`].
    pub fn open(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let mut registry = Registry::new(&config.capacity, config.rules);
        let mut advisories = Vec::new();
        let mut unsaved = Vec::new();

        let files = &config.files;
        let loads: [(&'static str, PathBuf, fn(&mut Registry, &Path) -> Result<usize>); 3] = [
            ("professors", data_dir.join(&files.professors), Registry::load_professors),
            ("students", data_dir.join(&files.students), Registry::load_students),
            ("courses", data_dir.join(&files.courses), Registry::load_courses),
        ];

        for (kind, path, load) in loads {
            if let Err(e) = load(&mut registry, &path) {
                tracing::warn!(kind, error = %e, "could not load data file");
                advisories.push(format!("could not load {}: {}", kind, e));
                unsaved.push(kind);
            }
        }

        // Course lines hold student and professor ids. Relinking against a
        // repository that failed to load strips them, so the course file stays as is.
        let depends_on_failed = unsaved.iter().any(|k| *k == "students" || *k == "professors");
        if depends_on_failed && !unsaved.iter().any(|k| *k == "courses") {
            advisories.push("courses will not be saved until every data file loads".to_string());
            unsaved.push("courses");
        }

        let dropped = registry.relink();
        if dropped > 0 {
            advisories.push(format!("dropped {} dangling references while relinking", dropped));
        }

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            config,
            registry,
            advisories,
            unsaved,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn advisories(&self) -> &[String] {
        &self.advisories
    }

    /// Write every repository that loaded cleanly and does not depend on one that failed.
    pub fn save(&self) -> Result<()> {
        let files = &self.config.files;

        if self.should_save("professors") {
            self.registry
                .professors()
                .save_all(&self.data_dir.join(&files.professors))?;
        }
        if self.should_save("students") {
            self.registry
                .students()
                .save_all(&self.data_dir.join(&files.students))?;
        }
        if self.should_save("courses") {
            self.registry
                .courses()
                .save_all(&self.data_dir.join(&files.courses))?;
        }
        Ok(())
    }

    fn should_save(&self, kind: &str) -> bool {
        let ok = !self.unsaved.iter().any(|k| *k == kind);
        if !ok {
            tracing::warn!(kind, "not saving, the data file failed to load");
        }
        ok
    }
}
