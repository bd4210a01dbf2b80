//! Schema-validated decoding of loosely-typed backend payloads.
//!
//! Every required field is checked by name; a missing or mistyped field is
//! always [`Error::MalformedResponse`] with the field named in the context,
//! never a silent default.

use serde_json::Value;

use crate::error::{Error, Result};

use super::live::LiveType;
use super::permission::PermissionBits;
use super::role::{Role, RoleAttrs, UserInfo};

pub(crate) fn require_object<'a>(value: &'a Value, key: &str) -> Result<&'a Value> {
    match value.get(key) {
        Some(v) if v.is_object() => Ok(v),
        Some(_) => Err(Error::malformed(format!("`{key}` is not an object"))),
        None => Err(Error::malformed(format!("`{key}` is missing"))),
    }
}

pub(crate) fn require_str<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::malformed(format!("`{key}` is missing or not a string")))
}

pub(crate) fn require_u64(value: &Value, key: &str) -> Result<u64> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::malformed(format!("`{key}` is missing or not an unsigned integer")))
}

fn optional_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn decode_attrs(value: &Value) -> Result<RoleAttrs> {
    Ok(RoleAttrs {
        user: UserInfo {
            user_id: require_str(value, "user_id")?.to_string().into(),
            nickname: require_str(value, "nickname")?.to_string(),
            avatar_url: optional_str(value, "avatar_url"),
        },
        stream_id: require_u64(value, "stream_id")?,
        gift_rank: u32::try_from(require_u64(value, "gift_rank")?)
            .map_err(|_| Error::malformed("`gift_rank` out of range"))?,
    })
}

fn decode_permissions(value: &Value) -> Result<PermissionBits> {
    let entries = value
        .get("permissions")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::malformed("`permissions` is missing or not an array"))?;

    let mut names = Vec::with_capacity(entries.len());
    for entry in entries {
        names.push(
            entry
                .as_str()
                .ok_or_else(|| Error::malformed("`permissions` entry is not a string"))?,
        );
    }
    Ok(PermissionBits::from_names(names))
}

/// Hydrate the local role from the `user` object of a join response.
pub(crate) fn decode_user_role(user: &Value) -> Result<Role> {
    let attrs = decode_attrs(user)?;
    match require_str(user, "role")? {
        "owner" => Ok(Role::Owner(attrs)),
        "broadcaster" => {
            let permissions = decode_permissions(user)?;
            if !permissions.has_all(PermissionBits::PUBLISH) {
                return Err(Error::malformed(
                    "broadcaster permissions missing camera or microphone",
                ));
            }
            Ok(Role::Broadcaster { attrs, permissions })
        }
        "audience" => Ok(Role::Audience(attrs)),
        other => Err(Error::malformed(format!("unknown role tag `{other}`"))),
    }
}

/// Hydrate the owner's role from an owner sub-object.
///
/// Owner payloads carry identity and presentation fields only; the gift
/// rank is optional there and defaults to zero.
pub(crate) fn decode_owner_role(owner: &Value) -> Result<Role> {
    Ok(Role::Owner(RoleAttrs {
        user: UserInfo {
            user_id: require_str(owner, "user_id")?.to_string().into(),
            nickname: require_str(owner, "nickname")?.to_string(),
            avatar_url: optional_str(owner, "avatar_url"),
        },
        stream_id: require_u64(owner, "stream_id")?,
        gift_rank: owner
            .get("gift_rank")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
    }))
}

/// Parse the server-reported live type from the `room` object.
pub(crate) fn decode_live_type(room: &Value) -> Result<LiveType> {
    let tag = require_str(room, "live_type")?;
    tag.parse()
        .map_err(|_| Error::malformed(format!("unknown live type `{tag}`")))
}
