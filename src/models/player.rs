use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::IntoParams;

use crate::utils::error::{AppError, AppResult};

/// 一个数据文件中的全部记录，保持文件中的顺序
///
/// 读取时不校验每条记录的结构，写入时原样保存。
pub type Dataset = Vec<Value>;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields (name or score)";

/// 取出记录的 `id`，只有字符串才参与匹配
pub fn player_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// 线性查找第一个 `id` 完全相等的记录
pub fn find_player_index(players: &[Value], id: &str) -> Option<usize> {
    players.iter().position(|p| player_id(p) == Some(id))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 更新请求中的部分玩家数据
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPatch(Map<String, Value>);

impl PlayerPatch {
    /// `name` 必须为真值，`score` 必须存在 (值可以是 null)
    pub fn from_value(value: Value) -> AppResult<Self> {
        let fields = match value {
            Value::Object(fields) => fields,
            _ => return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string())),
        };

        let has_name = fields.get("name").is_some_and(is_truthy);
        let has_score = fields.contains_key("score");
        if !has_name || !has_score {
            return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()));
        }

        Ok(Self(fields))
    }

    /// 浅合并：同名字段原位覆盖，新字段追加在末尾，未出现的字段保留
    ///
    /// 补丁里带 `id` 时同样会覆盖原记录的 `id`。
    pub fn apply_to(&self, record: &mut Value) {
        match record {
            Value::Object(existing) => {
                for (key, value) in &self.0 {
                    existing.insert(key.clone(), value.clone());
                }
            }
            other => *other = Value::Object(self.0.clone()),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileQuery {
    /// 数据文件名，单文件模式下可省略
    pub file: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerUpdatedResponse {
    pub message: String,
    pub player: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetCreatedResponse {
    pub message: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_requires_truthy_name_and_present_score() {
        assert!(PlayerPatch::from_value(json!({"name": "Alice", "score": 0})).is_ok());
        assert!(PlayerPatch::from_value(json!({"name": "Alice", "score": null})).is_ok());

        for body in [
            json!({"score": 1}),
            json!({"name": "", "score": 1}),
            json!({"name": 0, "score": 1}),
            json!({"name": false, "score": 1}),
            json!({"name": null, "score": 1}),
            json!({"name": "Alice"}),
            json!([{"name": "Alice", "score": 1}]),
            json!("Alice"),
        ] {
            let err = PlayerPatch::from_value(body.clone()).unwrap_err();
            assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE, "{body}");
        }
    }

    #[test]
    fn apply_overwrites_in_place_and_appends_new_fields() {
        let mut record = json!({"id": "p1", "name": "Alice", "score": 10, "team": "red"});
        let patch = PlayerPatch::from_value(json!({"score": 15, "name": "Alicia", "alive": true})).unwrap();

        patch.apply_to(&mut record);

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":"p1","name":"Alicia","score":15,"team":"red","alive":true}"#
        );
    }

    #[test]
    fn apply_can_overwrite_id() {
        let mut record = json!({"id": "p1", "name": "Alice", "score": 10});
        let patch = PlayerPatch::from_value(json!({"id": "p2", "name": "Alice", "score": 10})).unwrap();

        patch.apply_to(&mut record);
        assert_eq!(player_id(&record), Some("p2"));
    }

    #[test]
    fn find_matches_string_ids_only() {
        let players = vec![
            json!({"id": 1, "name": "Numeric"}),
            json!({"name": "No id"}),
            json!({"id": "1", "name": "First"}),
            json!({"id": "1", "name": "Duplicate"}),
        ];

        assert_eq!(find_player_index(&players, "1"), Some(2));
        assert_eq!(find_player_index(&players, "2"), None);
    }
}
