/// How public object URLs are addressed when no public base URL is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlStyle {
    /// `<scheme>://<endpoint>/<bucket>/<key>`, used with custom endpoints (MinIO, S3-compatible).
    PathStyle { endpoint: String, secure: bool },
    /// `https://<bucket>.s3.<region>.amazonaws.com/<key>`
    VirtualHosted { region: String },
}

/// Maps object keys to public URLs and back for one bucket.
#[derive(Debug, Clone)]
pub struct ObjectUrls {
    bucket: String,
    public_base: Option<String>,
    style: UrlStyle,
}

impl ObjectUrls {
    pub fn new(bucket: impl Into<String>, public_base: Option<String>, style: UrlStyle) -> Self {
        let public_base = public_base
            .map(|base| base.trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty());

        Self {
            bucket: bucket.into(),
            public_base,
            style,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Public URL for `key`. Inputs that already are URLs are returned untouched.
    pub fn object_url(&self, key: &str) -> String {
        if is_url(key) {
            return key.to_string();
        }
        let key = key.trim_start_matches('/');

        if let Some(base) = &self.public_base {
            return format!("{}/{}", base, key);
        }

        match &self.style {
            UrlStyle::PathStyle { endpoint, secure } => {
                let scheme = if *secure { "https" } else { "http" };
                format!("{}://{}/{}/{}", scheme, endpoint, self.bucket, key)
            }
            UrlStyle::VirtualHosted { region } => {
                format!("https://{}.s3.{}.amazonaws.com/{}", self.bucket, region, key)
            }
        }
    }

    /// Recover the object key from a URL produced by [`ObjectUrls::object_url`].
    ///
    /// Bare keys and URLs that match none of the known layouts are returned unchanged.
    pub fn object_key(&self, url: &str) -> String {
        let Some((_, rest)) = url.split_once("://") else {
            return url.to_string();
        };

        if let Some(base) = &self.public_base {
            if let Some(key) = url.strip_prefix(base.as_str()).and_then(|k| k.strip_prefix('/')) {
                if !key.is_empty() {
                    return key.to_string();
                }
            }
        }

        let (host, path) = rest.split_once('/').unwrap_or((rest, ""));

        // Virtual-hosted: the bucket is the first label of the host
        let hosted_prefix = format!("{}.s3.", self.bucket);
        if host.starts_with(&hosted_prefix) && host.ends_with(".amazonaws.com") && !path.is_empty() {
            return path.to_string();
        }

        // Path-style: the bucket is the first path segment
        if let Some(key) = path.strip_prefix(&format!("{}/", self.bucket)) {
            if !key.is_empty() {
                return key.to_string();
            }
        }

        url.to_string()
    }
}

fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
