/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn max_file_size_mb() -> usize {
    50
}

pub fn max_request_size_mb() -> usize {
    250
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn enable_compression() -> bool {
    true
}

// Upload defaults
pub fn default_folder() -> String {
    "uploads".to_string()
}

pub fn max_width() -> u32 {
    1920
}

pub fn max_height() -> u32 {
    1080
}

pub fn webp_quality() -> u8 {
    75
}

pub fn near_lossless() -> bool {
    true
}

pub fn upload_settings() -> super::models::UploadSettings {
    super::models::UploadSettings {
        default_folder: default_folder(),
        max_width: max_width(),
        max_height: max_height(),
        webp_quality: webp_quality(),
        near_lossless: near_lossless(),
    }
}

// Storage defaults
pub fn storage_backend() -> super::models::StorageBackend {
    super::models::StorageBackend::Local
}

pub fn local_root() -> String {
    "storage".to_string()
}

pub fn local_public_url() -> String {
    "http://localhost:8080/files".to_string()
}

pub fn local_settings() -> super::models::LocalSettings {
    super::models::LocalSettings {
        root: local_root(),
        public_url: local_public_url(),
    }
}

pub fn s3_region() -> String {
    "us-east-1".to_string()
}

pub fn s3_settings() -> super::models::S3Settings {
    super::models::S3Settings {
        bucket_name: String::new(),
        region: s3_region(),
        access_key_id: String::new(),
        secret_access_key: String::new(),
        endpoint_url: String::new(),
        public_url: String::new(),
    }
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        backend: storage_backend(),
        local: local_settings(),
        s3: s3_settings(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# Upgate Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 8080                          # Server port

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 60                    # Request timeout in seconds
max_concurrent_requests = 1000       # Max simultaneous connections
enable_compression = true            # HTTP compression (gzip/brotli/deflate)

# Limits
max_file_size_mb = 50                # Max size of a single uploaded file in MB
max_request_size_mb = 250            # Max size of a whole upload request in MB

# CORS
allowed_origins = ["*"]              # "*" = all origins | ["https://example.com"] for production

# ===============================================================================
# UPLOAD PIPELINE
# ===============================================================================
[upload]
default_folder = "uploads"           # Folder used when no entityType/entityId is given
max_width = 1920                     # Images larger than this box are downsized (aspect kept)
max_height = 1080
webp_quality = 75                    # WebP quality (0-100)
near_lossless = true                 # Near-lossless WebP for opaque images (alpha is always lossless)

# ===============================================================================
# STORAGE BACKEND
# ===============================================================================
[storage]
backend = "local"                    # Storage backend: "local" or "s3"

# Local filesystem storage (development)
[storage.local]
root = "storage"                     # Directory objects are written to
public_url = "http://localhost:8080/files"  # Base URL reported for stored objects (served under /files)

# S3 Configuration (only used if backend = "s3")
# BUCKET_NAME, REGION, AWS_IAM_ACCESS_KEY and AWS_SECRET_KEY override these values
[storage.s3]
bucket_name = ""                     # S3 bucket name
region = "us-east-1"                 # S3 region
access_key_id = ""                   # AWS Access Key ID
secret_access_key = ""               # AWS Secret Access Key
endpoint_url = ""                    # Custom endpoint for S3-compatible stores (optional)
public_url = ""                      # Public URL for objects (optional, defaults to the bucket URL)
"#;
