use crate::utils::error::{AppError, AppResult};

const MAX_FILE_NAME_LEN: usize = 255;

pub const INVALID_FILE_MESSAGE: &str = "Invalid file parameter.";

/// 检查调用方传入的数据文件名
///
/// 文件名直接拼接到数据目录下，因此只允许 `[A-Za-z0-9._-]`，且不能以 `.` 开头，
/// 这样既不会出现路径分隔符，也不会出现 `..`。
pub fn validate_file_name(name: &str) -> AppResult<&str> {
    let valid = !name.is_empty()
        && name.len() <= MAX_FILE_NAME_LEN
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(name)
    } else {
        log::warn!("拒绝非法的数据文件名: {:?}", name);
        Err(AppError::BadRequest(INVALID_FILE_MESSAGE.to_string()))
    }
}

/// 解析请求使用的数据文件
///
/// 优先使用查询参数 `file`，其次使用单文件模式下的默认文件；两者都没有时返回
/// `missing_message` 对应的 400 错误。空字符串视为未提供。
pub fn resolve_file_name(
    requested: Option<&str>,
    default_file: Option<&str>,
    missing_message: &str,
) -> AppResult<String> {
    let name = requested
        .filter(|f| !f.is_empty())
        .or(default_file)
        .ok_or_else(|| AppError::BadRequest(missing_message.to_string()))?;

    validate_file_name(name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_json_names() {
        assert!(validate_file_name("temp.json").is_ok());
        assert!(validate_file_name("game-2_players.v1.json").is_ok());
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for name in ["../x.json", "..", ".hidden", "a/b.json", "a\\b.json", "", "café.json"] {
            assert!(
                matches!(validate_file_name(name), Err(AppError::BadRequest(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn falls_back_to_default_file() {
        let name = resolve_file_name(None, Some("players.json"), "missing").unwrap();
        assert_eq!(name, "players.json");

        let name = resolve_file_name(Some(""), Some("players.json"), "missing").unwrap();
        assert_eq!(name, "players.json");

        let name = resolve_file_name(Some("other.json"), Some("players.json"), "missing").unwrap();
        assert_eq!(name, "other.json");
    }

    #[test]
    fn missing_file_uses_caller_message() {
        let err = resolve_file_name(None, None, "Missing file parameter.").unwrap_err();
        assert_eq!(err.to_string(), "Missing file parameter.");
    }
}
