//! Partial profile updates.
//!
//! [`RawProfileUpdate`] is the wire schema shared by the JSON and multipart
//! paths. [`RawProfileUpdate::into_update`] turns it into a typed
//! [`ProfileUpdate`], dropping blank strings and logging (not failing on)
//! optional values it cannot use.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{image::EmbeddedImage, profile::Availability};

// ─── Wire schema ─────────────────────────────────────────────────────────────

/// Every key a profile update may carry. Unknown keys are ignored by serde,
/// and a value of the wrong JSON type is dropped rather than failing the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfileUpdate {
  #[serde(default, deserialize_with = "lenient_string")]
  pub username:        Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub email:           Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub bio:             Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub location:        Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub skills:          Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub information:     Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub profile_picture: Option<String>,
  /// Integer or numeric string.
  pub movies_done:     Option<Value>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub availability:    Option<String>,
}

/// Accept any JSON value; keep strings, drop everything else with a warning.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Option::<Value>::deserialize(deserializer)? {
    None | Some(Value::Null) => None,
    Some(Value::String(s)) => Some(s),
    Some(other) => {
      tracing::warn!(value = %other, "ignoring non-string profile field");
      None
    }
  })
}

impl RawProfileUpdate {
  /// Set a field from a multipart text part. Returns `false` for names that
  /// are not part of the schema.
  pub fn set_text_field(&mut self, name: &str, value: String) -> bool {
    let slot = match name {
      "username" => &mut self.username,
      "email" => &mut self.email,
      "bio" => &mut self.bio,
      "location" => &mut self.location,
      "skills" => &mut self.skills,
      "information" => &mut self.information,
      "profile_picture" => &mut self.profile_picture,
      "availability" => &mut self.availability,
      "movies_done" => {
        self.movies_done = Some(Value::String(value));
        return true;
      }
      _ => return false,
    };
    *slot = Some(value);
    true
  }

  pub fn into_update(self) -> ProfileUpdate {
    let profile_picture = truthy(self.profile_picture).and_then(|raw| {
      EmbeddedImage::parse(&raw)
        .inspect_err(|e| tracing::warn!(error = %e, "ignoring profile_picture"))
        .ok()
    });

    let movies_done = self.movies_done.and_then(|v| {
      let parsed = parse_movies_done(&v);
      if parsed.is_none() {
        tracing::warn!(value = %v, "ignoring non-numeric movies_done");
      }
      parsed
    });

    let availability = self.availability.and_then(|raw| {
      let parsed = Availability::parse(&raw);
      if parsed.is_none() {
        tracing::warn!(value = %raw, "ignoring availability; expected yes or no");
      }
      parsed
    });

    ProfileUpdate {
      username: truthy(self.username),
      email: truthy(self.email),
      bio: truthy(self.bio),
      location: truthy(self.location),
      skills: truthy(self.skills),
      information: truthy(self.information),
      profile_picture,
      movies_done,
      availability,
    }
  }
}

fn truthy(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

fn parse_movies_done(value: &Value) -> Option<u32> {
  match value {
    Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

// ─── Typed update ────────────────────────────────────────────────────────────

/// A validated partial update. `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
  pub username:        Option<String>,
  pub email:           Option<String>,
  pub bio:             Option<String>,
  pub location:        Option<String>,
  pub skills:          Option<String>,
  pub information:     Option<String>,
  pub profile_picture: Option<EmbeddedImage>,
  pub movies_done:     Option<u32>,
  pub availability:    Option<Availability>,
}
