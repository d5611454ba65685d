// src/dtos/response.rs
use axum::Json;
use serde::Serialize;

/// Success envelope carrying a payload: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Success envelope without a payload: `{"success": true, "message": ...}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

pub fn ok<T: Serialize>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse {
        success: true,
        data,
    })
}

pub fn ok_message(message: impl Into<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message: message.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelopes_carry_the_success_flag() {
        let data = serde_json::to_value(&ok(vec![1, 2]).0).unwrap();
        assert_eq!(data["success"], true);
        assert_eq!(data["data"], serde_json::json!([1, 2]));

        let message = serde_json::to_value(&ok_message("تم").0).unwrap();
        assert_eq!(message["success"], true);
        assert_eq!(message["message"], "تم");
    }
}
