use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{UserPatch, UserRecord, UserUpsert};
use super::actions::ProfileAction;

impl Entity for UserRecord {
    type Id = String;
    type CreatePayload = UserUpsert;
    type Patch = UserPatch;
    type Action = ProfileAction;
    type ActionResult = UserRecord;

    fn id(&self) -> &String { &self.identity_key }

    /// Creates a new record, defaulting every omitted profile field to `""`.
    fn from_create(id: String, payload: UserUpsert) -> Result<Self, FrameworkError> {
        Ok(Self {
            identity_key: id,
            email: payload.email,
            name: payload.name.unwrap_or_default(),
            headline: payload.headline.unwrap_or_default(),
            bio: payload.bio.unwrap_or_default(),
            profile_picture: payload.profile_picture.unwrap_or_default(),
        })
    }

    /// Merges an upsert into an existing record.
    ///
    /// # Fields Updated
    /// Only the optional fields present in the payload. The email is fixed at
    /// creation and is ignored here.
    fn on_upsert(&mut self, payload: UserUpsert) -> Result<(), FrameworkError> {
        merge(&mut self.name, payload.name);
        merge(&mut self.headline, payload.headline);
        merge(&mut self.bio, payload.bio);
        merge(&mut self.profile_picture, payload.profile_picture);
        Ok(())
    }

    /// Applies a partial patch verbatim, including explicit empty values.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), FrameworkError> {
        merge(&mut self.email, patch.email);
        merge(&mut self.name, patch.name);
        merge(&mut self.headline, patch.headline);
        merge(&mut self.bio, patch.bio);
        merge(&mut self.profile_picture, patch.profile_picture);
        Ok(())
    }

    fn handle_action(&mut self, action: ProfileAction) -> Result<UserRecord, FrameworkError> {
        match action {
            ProfileAction::Complete(completion) => {
                completion.apply_to(self);
                Ok(self.clone())
            }
        }
    }
}

fn merge(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProfileCompletion;

    fn created() -> UserRecord {
        UserRecord::from_create("u1".into(), UserUpsert::new("u1", "a@b.com")).unwrap()
    }

    #[test]
    fn test_create_applies_defaults() {
        assert_eq!(
            created(),
            UserRecord {
                identity_key: "u1".into(),
                email: "a@b.com".into(),
                name: String::new(),
                headline: String::new(),
                bio: String::new(),
                profile_picture: String::new(),
            }
        );
    }

    #[test]
    fn test_upsert_merges_present_fields_only() {
        let mut record = created();
        record.name = "Ada".into();
        record.bio = "old".into();

        let mut payload = UserUpsert::new("u1", "other@b.com");
        payload.bio = Some(String::new());
        payload.headline = Some("Engineer".into());
        record.on_upsert(payload).unwrap();

        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.name, "Ada");
        assert_eq!(record.bio, "");
        assert_eq!(record.headline, "Engineer");
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut record = created();
        record.name = "Ada".into();
        let patch = UserPatch { bio: Some("hello".into()), ..UserPatch::default() };

        record.on_update(patch.clone()).unwrap();
        let once = record.clone();
        record.on_update(patch).unwrap();

        assert_eq!(record, once);
        assert_eq!(record.bio, "hello");
        assert_eq!(record.name, "Ada");
    }

    #[test]
    fn test_complete_replaces_all_four_fields() {
        let mut record = created();
        record.bio = "keep?".into();

        let completion =
            ProfileCompletion::new("u1", "Ada", "Engineer", "New bio", "https://img/ada.png").unwrap();
        let result = record.handle_action(ProfileAction::Complete(completion)).unwrap();

        assert_eq!(result.bio, "New bio");
        assert_eq!(result.profile_picture, "https://img/ada.png");
        assert_eq!(result, record);
    }
}
