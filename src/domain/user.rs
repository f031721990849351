use serde::{Deserialize, Deserializer, Serialize};

/// A user's profile document, keyed by the identity issued by the auth provider.
///
/// # Actor Framework
/// This struct implements the [`Entity`](crate::actor_framework::Entity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::actor_framework::ResourceActor).
///
/// See [`impl Entity for UserRecord`](#impl-Entity-for-UserRecord) for details on:
/// - Upsert parameters ([`UserUpsert`])
/// - Update parameters ([`UserPatch`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub identity_key: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_picture: String,
}

/// Body of `POST /api/users`.
///
/// Optional fields that are absent stay `None`. An explicit empty string is
/// `Some("")` and counts as present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpsert {
    pub identity_key: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Partial update over the mutable fields of a [`UserRecord`].
///
/// Unknown keys are rejected, and so is `identityKey`, which never changes.
/// A JSON `null` clears the field back to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

// Only called when the key is present, so `null` maps to `Some("")`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

/// Wire shape of `POST /api/users/complete-profile`, before validation.
///
/// Absent, `null` and `""` all count as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompletionRequest {
    pub identity_key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// A profile completion whose four fields are known to be non-empty.
///
/// Only constructed through [`ProfileCompletion::new`] or the `TryFrom`
/// conversion, so holding one means validation already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCompletion {
    identity_key: String,
    name: String,
    headline: String,
    bio: String,
    profile_picture: String,
}

pub const MISSING_PROFILE_FIELDS: &str =
    "All fields are required: name, headline, bio, and profile picture";

impl ProfileCompletion {
    pub fn new(
        identity_key: impl Into<String>,
        name: impl Into<String>,
        headline: impl Into<String>,
        bio: impl Into<String>,
        profile_picture: impl Into<String>,
    ) -> Result<Self, String> {
        let completion = Self {
            identity_key: identity_key.into(),
            name: name.into(),
            headline: headline.into(),
            bio: bio.into(),
            profile_picture: profile_picture.into(),
        };

        let fields = [
            &completion.name,
            &completion.headline,
            &completion.bio,
            &completion.profile_picture,
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(MISSING_PROFILE_FIELDS.to_string());
        }

        Ok(completion)
    }

    pub fn identity_key(&self) -> &str {
        &self.identity_key
    }

    /// Overwrites all four profile fields of `record`.
    pub fn apply_to(self, record: &mut UserRecord) {
        record.name = self.name;
        record.headline = self.headline;
        record.bio = self.bio;
        record.profile_picture = self.profile_picture;
    }
}

impl TryFrom<ProfileCompletionRequest> for ProfileCompletion {
    type Error = String;

    fn try_from(request: ProfileCompletionRequest) -> Result<Self, Self::Error> {
        Self::new(
            request.identity_key,
            request.name.unwrap_or_default(),
            request.headline.unwrap_or_default(),
            request.bio.unwrap_or_default(),
            request.profile_picture.unwrap_or_default(),
        )
    }
}

impl UserUpsert {
    /// Creates an upsert carrying only the identity key and email.
    pub fn new(identity_key: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            identity_key: identity_key.into(),
            email: email.into(),
            name: None,
            headline: None,
            bio: None,
            profile_picture: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let record = UserRecord {
            identity_key: "u1".into(),
            email: "a@b.com".into(),
            name: String::new(),
            headline: String::new(),
            bio: String::new(),
            profile_picture: "https://img/1.png".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["identityKey"], "u1");
        assert_eq!(value["profilePicture"], "https://img/1.png");
    }

    #[test]
    fn test_patch_distinguishes_absent_null_and_empty() {
        let patch: UserPatch =
            serde_json::from_value(json!({ "bio": null, "name": "" })).unwrap();

        assert_eq!(patch.bio, Some(String::new()));
        assert_eq!(patch.name, Some(String::new()));
        assert_eq!(patch.headline, None);
        assert_eq!(patch.profile_picture, None);
    }

    #[test]
    fn test_patch_rejects_unknown_and_immutable_fields() {
        assert!(serde_json::from_value::<UserPatch>(json!({ "nickname": "x" })).is_err());
        assert!(serde_json::from_value::<UserPatch>(json!({ "identityKey": "u2" })).is_err());
    }

    #[test]
    fn test_completion_requires_every_field() {
        let full = ["Ada", "Engineer", "Hello", "https://img/ada.png"];
        assert!(ProfileCompletion::new("u1", full[0], full[1], full[2], full[3]).is_ok());

        for missing in 0..full.len() {
            let mut fields = full;
            fields[missing] = "";
            let result = ProfileCompletion::new("u1", fields[0], fields[1], fields[2], fields[3]);
            assert_eq!(result, Err(MISSING_PROFILE_FIELDS.to_string()), "field {missing}");
        }
    }

    #[test]
    fn test_completion_request_treats_null_as_missing() {
        for field in ["name", "headline", "bio", "profilePicture"] {
            let mut body = json!({
                "identityKey": "u1",
                "name": "Ada",
                "headline": "Engineer",
                "bio": "Hello",
                "profilePicture": "https://img/ada.png",
            });
            body[field] = Value::Null;

            let request: ProfileCompletionRequest = serde_json::from_value(body).unwrap();
            assert_eq!(
                ProfileCompletion::try_from(request),
                Err(MISSING_PROFILE_FIELDS.to_string()),
                "{field}"
            );
        }
    }
}
