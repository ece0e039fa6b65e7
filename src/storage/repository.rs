use std::fs;
use std::path::Path;

use crate::entity::Record;
use crate::error::{AulaError, Result};

/// Turns one persisted line back into an entity.
pub type Decoder<T> = fn(&str) -> Result<T>;

/// Insertion-ordered store with a hard capacity, keyed by record id.
pub struct Repository<T> {
    kind: &'static str,
    items: Vec<T>,
    capacity: usize,
    decode: Decoder<T>,
}

impl<T: Record> Repository<T> {
    pub fn new(kind: &'static str, capacity: usize, decode: Decoder<T>) -> Self {
        Self {
            kind,
            items: Vec::new(),
            capacity,
            decode,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn add(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            return Err(AulaError::CapacityFull(format!(
                "{} repository holds at most {} entries",
                self.kind, self.capacity
            )));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn contains(&self, id: u32) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn find_by_id(&self, id: u32) -> Result<&T> {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| self.not_found(id))
    }

    pub fn find_by_id_mut(&mut self, id: u32) -> Result<&mut T> {
        let kind = self.kind;
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| AulaError::NotFound(format!("{} {}", kind, id)))
    }

    /// Removes the entry and closes the gap, keeping the order of the rest.
    pub fn remove_by_id(&mut self, id: u32) -> Result<T> {
        let position = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| self.not_found(id))?;
        Ok(self.items.remove(position))
    }

    /// Swap in a new value for the entry with the same id.
    pub fn replace(&mut self, item: T) -> Result<()> {
        let slot = self.find_by_id_mut(item.id())?;
        *slot = item;
        Ok(())
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Write every entry as one line, replacing the file.
    pub fn save_all(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut contents = String::new();
        for item in &self.items {
            contents.push_str(&item.to_line());
            contents.push('\n');
        }
        fs::write(path, contents)?;

        tracing::debug!(
            kind = self.kind,
            count = self.items.len(),
            path = %path.display(),
            "saved"
        );
        Ok(())
    }

    /// Replace the contents with the entries stored at `path`.
    ///
    /// A missing file leaves the repository untouched. Blank lines are skipped,
    /// lines beyond capacity are dropped, and any malformed line fails the whole
    /// load without changing the current contents.
    pub fn load_all(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            tracing::debug!(
                kind = self.kind,
                path = %path.display(),
                "no data file, starting empty"
            );
            return Ok(0);
        }

        let contents = fs::read_to_string(path)?;
        let mut loaded = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if loaded.len() >= self.capacity {
                tracing::warn!(
                    kind = self.kind,
                    capacity = self.capacity,
                    "data file has more entries than capacity, ignoring the rest"
                );
                break;
            }
            let item = (self.decode)(line).map_err(|e| {
                AulaError::InvalidFormat(format!(
                    "{} line {}: {}",
                    path.display(),
                    index + 1,
                    describe(e)
                ))
            })?;
            loaded.push(item);
        }

        self.items = loaded;
        tracing::debug!(kind = self.kind, count = self.items.len(), "loaded");
        Ok(self.items.len())
    }

    fn not_found(&self, id: u32) -> AulaError {
        AulaError::NotFound(format!("{} {}", self.kind, id))
    }
}

fn describe(error: AulaError) -> String {
    match error {
        AulaError::InvalidFormat(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Professor, Student};
    use tempfile::TempDir;

    fn students(capacity: usize) -> Repository<Student> {
        Repository::new("student", capacity, Student::from_line)
    }

    fn ids(repo: &Repository<Student>) -> Vec<u32> {
        repo.all().iter().map(Record::id).collect()
    }

    #[test]
    fn test_add_respects_capacity() {
        let mut repo = students(2);
        repo.add(Student::new(1, "Ana", 20, "Prepa")).unwrap();
        repo.add(Student::new(2, "Bea", 21, "Prepa")).unwrap();

        let result = repo.add(Student::new(3, "Caro", 22, "Prepa"));
        assert!(matches!(result, Err(AulaError::CapacityFull(_))));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_find_and_remove() {
        let mut repo = students(5);
        for id in 1..=4 {
            repo.add(Student::new(id, format!("S{}", id), 20, "Prepa")).unwrap();
        }

        assert_eq!(repo.find_by_id(3).unwrap().full_name, "S3");
        assert!(matches!(repo.find_by_id(9), Err(AulaError::NotFound(_))));

        let removed = repo.remove_by_id(2).unwrap();
        assert_eq!(removed.account_id(), 2);
        assert_eq!(ids(&repo), vec![1, 3, 4]);
        assert!(matches!(repo.remove_by_id(2), Err(AulaError::NotFound(_))));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut repo = students(5);
        repo.add(Student::new(1, "Ana", 20, "Prepa")).unwrap();
        repo.add(Student::new(2, "Bea", 21, "Prepa")).unwrap();

        repo.replace(Student::new(1, "Ana María", 20, "Prepa")).unwrap();
        assert_eq!(repo.all()[0].full_name, "Ana María");
        assert!(matches!(
            repo.replace(Student::new(7, "X", 1, "Y")),
            Err(AulaError::NotFound(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("alumnos.txt");

        let mut repo = students(5);
        repo.add(Student::new(1, "Ana", 20, "Prepa 6")).unwrap();
        repo.add(Student::new(2, "Bea", 21, "CCH Sur")).unwrap();
        repo.save_all(&path).unwrap();

        let mut reloaded = students(5);
        assert_eq!(reloaded.load_all(&path).unwrap(), 2);
        assert_eq!(reloaded.all(), repo.all());
    }

    #[test]
    fn test_load_missing_file_is_noop() {
        let tmp = TempDir::new().unwrap();
        let mut repo = students(5);
        repo.add(Student::new(1, "Ana", 20, "Prepa")).unwrap();

        assert_eq!(repo.load_all(&tmp.path().join("missing.txt")).unwrap(), 0);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_load_stops_at_capacity() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("alumnos.txt");
        fs::write(&path, "1|A|20|P\n\n2|B|20|P\n3|C|20|P\n").unwrap();

        let mut repo = students(2);
        assert_eq!(repo.load_all(&path).unwrap(), 2);
        assert_eq!(ids(&repo), vec![1, 2]);
    }

    #[test]
    fn test_malformed_line_fails_whole_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("profesores.txt");
        fs::write(&path, "1|Luis|Doctorado|2001\n2|Eva|Doctorado\n").unwrap();

        let mut repo: Repository<Professor> = Repository::new("professor", 5, Professor::from_line);
        repo.add(Professor::new(9, "Previa", "Lic", 1990)).unwrap();

        let err = repo.load_all(&path).unwrap_err();
        match err {
            AulaError::InvalidFormat(msg) => assert!(msg.contains("line 2")),
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.all()[0].employee_id(), 9);
    }
}
