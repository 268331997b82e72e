use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 客户端校验错误（在发起任何网络调用之前被拦截）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非成功状态码
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应体解码失败
    #[error("API响应解码失败 ({endpoint}): {source}")]
    DecodeFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// JSON 结构解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 响应缺少必需字段
    #[error("API响应缺少字段 ({endpoint}): {field}")]
    MissingField {
        endpoint: String,
        field: &'static str,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 客户端校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 提交说明为空
    #[error("请输入作业内容")]
    EmptyDescription,
    /// 未选择文件
    #[error("请选择要上传的文件")]
    NoFileChosen,
    /// 文件类型不支持
    #[error("不支持的文件类型: {file_name}")]
    UnsupportedFileType { file_name: String },
    /// 文件超出大小限制
    #[error("文件大小 {size} 字节超出上限 {limit} 字节")]
    FileTooLarge { size: u64, limit: u64 },
    /// 分数为空
    #[error("分数不能为空")]
    EmptyScore,
    /// 分数不是有效数字
    #[error("无效的分数: {value}")]
    InvalidScore { value: String },
}

/// 业务逻辑错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessError {
    /// 提交缺少已存储的文件引用，无法进行 AI 批改
    #[error("提交 {uuid} 没有已上传的文件，无法批改")]
    MissingSubmissionFile { uuid: String },
    /// 后端返回的分数/反馈只设置了一半
    #[error("提交 {uuid} 的分数与反馈状态不一致")]
    InconsistentGrade { uuid: String },
    /// 作业不存在
    #[error("找不到作业: {id}")]
    AssignmentNotFound { id: String },
    /// 没有待确认的批改建议
    #[error("当前没有待确认的批改建议")]
    NoPendingProposal,
    /// 索引超出范围
    #[error("索引 {index} 超出范围 [0, {max_index}]")]
    IndexOutOfRange { index: usize, max_index: usize },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
