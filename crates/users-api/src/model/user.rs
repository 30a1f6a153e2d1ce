use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

/// Identifier of a [`User`].
pub type UserId = u32;

/// A user record.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// `name`, `age` and `city` hold whatever JSON value the client sent, `null` included;
/// nothing checks their presence or type. `None` means the key was never supplied and
/// is left out of the output. Keys that an update supplies outside the fixed schema end
/// up in `extra` and are serialised inline after the fixed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a new user. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub city: Option<Value>,
}

/// Payload for `PUT` and `PATCH`: a shallow merge onto an active user.
///
/// `Some` means the key was present, with `Some(Value::Null)` for an explicit `null`.
/// `id` and `deleted` are honoured like any other key but keep their types, since the
/// store matches on them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub city: Option<Value>,
    #[serde(default)]
    pub deleted: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Marks a key as present, keeping an explicit `null` as `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl User {
    /// Builds an active user from a create payload.
    pub fn new(id: UserId, params: UserCreate) -> Self {
        Self {
            id,
            name: params.name,
            age: params.age,
            city: params.city,
            deleted: false,
            extra: Map::new(),
        }
    }

    /// Overwrites every key present in `patch` and leaves the rest alone.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.age.is_some() {
            self.age = patch.age;
        }
        if patch.city.is_some() {
            self.city = patch.city;
        }
        if let Some(deleted) = patch.deleted {
            self.deleted = deleted;
        }
        self.extra.extend(patch.extra);
    }
}

const SEED: [(&str, i64, &str); 4] = [
    ("Jan Kowalski", 30, "Warszawa"),
    ("Anna Nowak", 25, "Kraków"),
    ("Piotr Wiśniewski", 35, "Warszawa"),
    ("Maria Kowalczyk", 28, "Gdańsk"),
];

/// The four records the store holds at start-up and after every reset.
pub fn seed_users() -> Vec<User> {
    SEED.iter()
        .zip(1..)
        .map(|(&(name, age, city), id)| {
            User::new(
                id,
                UserCreate {
                    name: Some(json!(name)),
                    age: Some(json!(age)),
                    city: Some(json!(city)),
                },
            )
        })
        .collect()
}
