//! User table operations

use tracing::instrument;

use super::parse::{read_table, write_table};
use super::{keys, BlobStore};
use crate::error::{Error, Result};
use crate::invariants::assert_user_table_invariants;
use crate::models::User;

pub struct UserTable<'a> {
    blobs: &'a dyn BlobStore,
}

impl<'a> UserTable<'a> {
    pub fn new(blobs: &'a dyn BlobStore) -> Self {
        Self { blobs }
    }

    /// All registered users, in registration order
    pub fn all(&self) -> Result<Vec<User>> {
        read_table(self.blobs, keys::USERS)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.all()?.len())
    }

    /// Find user by exact email
    #[instrument(skip(self))]
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.all()?.into_iter().find(|u| u.email == email))
    }

    /// Append a user. Fails with `Conflict` if the email is taken.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub fn insert(&self, user: User) -> Result<()> {
        let mut users = self.all()?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::Conflict("Email already exists".to_string()));
        }
        users.push(user);
        assert_user_table_invariants(&users);
        write_table(self.blobs, keys::USERS, &users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::storage::MemoryBlobStore;

    fn user(email: &str, seq: usize) -> User {
        User::new(email.to_string(), "hash".to_string(), Role::User, seq)
    }

    #[test]
    fn test_insert_and_find() {
        let blobs = MemoryBlobStore::new();
        let table = UserTable::new(&blobs);

        table.insert(user("a@test.com", 1)).unwrap();
        table.insert(user("b@test.com", 2)).unwrap();

        let found = table.find_by_email("b@test.com").unwrap().unwrap();
        assert_eq!(found.custom_id, "USER002");
        assert!(table.find_by_email("c@test.com").unwrap().is_none());
        assert_eq!(table.count().unwrap(), 2);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let blobs = MemoryBlobStore::new();
        let table = UserTable::new(&blobs);

        table.insert(user("a@test.com", 1)).unwrap();
        let err = table.insert(user("a@test.com", 2)).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(table.count().unwrap(), 1);
    }
}
