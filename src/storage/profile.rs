//! Profile repository backed by profile.json

use std::path::PathBuf;

use crate::error::FinanceError;
use crate::models::Profile;

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};

pub struct ProfileRepository {
    path: PathBuf,
}

impl ProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Stored profile, or `None` before the first save
    pub fn load(&self) -> Result<Option<Profile>, FinanceError> {
        read_json_optional(&self.path)
    }

    pub fn save(&self, profile: &Profile) -> Result<(), FinanceError> {
        write_json_atomic(&self.path, profile)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn remove(&self) -> Result<(), FinanceError> {
        remove_if_exists(&self.path)
    }
}
