// ==========================================
// 车间生产计划与执行系统 - API层错误类型
// ==========================================
// 职责: 定义边界层错误分类，转换仓储错误为用户可读消息
// 约束: 所有校验错误必须指明具体字段（可解释性）
// 映射: InvalidInput→400, NotFound→404, 其余→500（详情只记日志）
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求校验错误（400）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 标识错误（404）
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误（500）
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误（500）
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_) => 400,
            ApiError::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// 对外暴露的错误消息
    ///
    /// 400/404 返回具体原因；500 返回通用消息，详情由服务端日志保留。
    pub fn public_message(&self) -> String {
        match self {
            ApiError::InvalidInput(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            _ => "服务器内部错误".to_string(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将仓储层的技术错误转换为边界层分类
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_映射404() {
        let err: ApiError = RepositoryError::not_found("Material", 99).into();
        assert_eq!(err.http_status(), 404);
        assert!(err.public_message().contains("Material"));
    }

    #[test]
    fn test_内部错误不外泄详情() {
        let err = ApiError::DatabaseError("table corrupted".to_string());
        assert_eq!(err.http_status(), 500);
        assert!(!err.public_message().contains("corrupted"));
    }
}
