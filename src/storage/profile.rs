//! Profile repository operations over `profile.json` (single record).

use crate::models::Profile;
use crate::storage::{Store, StoreError};

const PROFILE_FILE: &str = "profile.json";

/// Get the profile, or None if one was never saved.
pub async fn get(store: &Store) -> Result<Option<Profile>, StoreError> {
    store.read(PROFILE_FILE).await
}

/// Replace the stored profile.
pub async fn upsert(store: &Store, profile: &Profile) -> Result<(), StoreError> {
    let _guard = store.lock_for_update().await;
    store.write_file(PROFILE_FILE, profile).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AboutTexts, LocalizedString};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path());
        store.init().await.unwrap();

        assert!(get(&store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path());
        store.init().await.unwrap();

        let profile = Profile {
            name: "Jane".to_string(),
            role: LocalizedString {
                ru: "Разработчик".to_string(),
                en: "Developer".to_string(),
            },
            description: LocalizedString {
                ru: String::new(),
                en: String::new(),
            },
            photo_url: None,
            about_texts: AboutTexts {
                ru: vec!["Привет".to_string()],
                en: vec!["Hi".to_string()],
            },
            socials: None,
        };

        upsert(&store, &profile).await.unwrap();

        let read = get(&store).await.unwrap().unwrap();
        assert_eq!(read.name, "Jane");
        assert_eq!(read.role.en, "Developer");
        assert_eq!(read.about_texts.en, vec!["Hi".to_string()]);
    }
}
