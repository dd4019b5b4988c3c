use serde::{Deserialize, Serialize};

pub const CODE_SUCCESS: i32 = 1;
pub const CODE_ERROR: i32 = 0;

/// Единый конверт ответа API: `code` = 1 успех, 0 ошибка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: None,
            data: Some(data),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_ERROR,
            msg: Some(msg.into()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}

impl ApiResponse<()> {
    /// Успех без данных (`"data": null`)
    pub fn ok() -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: None,
            data: None,
        }
    }
}

/// Страница результатов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub total: u64,
    pub records: Vec<T>,
}
