/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 文件存储服务地址（multipart POST 目标）
    pub file_store_endpoint: String,
    /// 文档清单（TOML）存放目录
    pub manifest_folder: String,
    /// 文件选择器接受的类型，格式同 HTML accept 属性
    pub accepted_file_types: String,
    /// 同时处理的清单数量
    pub max_concurrent_manifests: usize,
    /// 提交成功后是否归档清单（重命名为 .done）
    pub archive_committed: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 提交失败记录文件，供人工重试
    pub failure_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_store_endpoint: "http://localhost:9000/files".to_string(),
            manifest_folder: "manifests".to_string(),
            accepted_file_types: "image/*,application/pdf".to_string(),
            max_concurrent_manifests: 4,
            archive_committed: true,
            verbose_logging: false,
            output_log_file: "upload_log.txt".to_string(),
            failure_log_file: "failed_uploads.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            file_store_endpoint: std::env::var("FILE_STORE_ENDPOINT").unwrap_or(default.file_store_endpoint),
            manifest_folder: std::env::var("MANIFEST_FOLDER").unwrap_or(default.manifest_folder),
            accepted_file_types: std::env::var("ACCEPTED_FILE_TYPES").unwrap_or(default.accepted_file_types),
            max_concurrent_manifests: std::env::var("MAX_CONCURRENT_MANIFESTS").ok().and_then(|v| v.parse().ok()).filter(|n: &usize| *n > 0).unwrap_or(default.max_concurrent_manifests),
            archive_committed: std::env::var("ARCHIVE_COMMITTED").ok().and_then(|v| v.parse().ok()).unwrap_or(default.archive_committed),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            failure_log_file: std::env::var("FAILURE_LOG_FILE").unwrap_or(default.failure_log_file),
        }
    }
}
