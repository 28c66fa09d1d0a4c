//! Object storage port for uploaded profile images.

use std::fmt;
use std::str::FromStr;

use super::PortFuture;

/// The buckets images may be uploaded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Avatar images.
    ProfileImages,
    /// Page banner images.
    Banners,
}

impl Bucket {
    /// The bucket name as known to the storage backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProfileImages => "profile-images",
            Self::Banners => "banners",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile-images" => Ok(Self::ProfileImages),
            "banners" => Ok(Self::Banners),
            other => Err(format!("unknown bucket: {other}")),
        }
    }
}

/// Stores binary objects and hands out their public URLs.
pub trait ObjectStorage: Send + Sync {
    /// Removes the object at `path`. Removing a missing object is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, bucket: Bucket, path: &str) -> PortFuture<'_, ()>;

    /// Uploads `bytes` to `path`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> PortFuture<'_, ()>;

    /// Returns the public URL under which `path` is served.
    fn public_url(&self, bucket: Bucket, path: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_names_round_trip() {
        for bucket in [Bucket::ProfileImages, Bucket::Banners] {
            assert_eq!(bucket.as_str().parse::<Bucket>().unwrap(), bucket);
        }
    }

    #[test]
    fn unknown_bucket_is_rejected() {
        assert!("avatars".parse::<Bucket>().is_err());
    }
}
