//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    TranslationSettings,
};

/// 設定ファイルを読み込む
///
/// # Arguments
/// * `path` - 設定ファイル (JSON) のパス
///
/// # Returns
/// - `Ok(settings)`: 読み込みとバリデーションに成功
/// - `Err(ConfigError)`: エラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_settings(path: &Path) -> Result<TranslationSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", path);

    let content = std::fs::read_to_string(path)?;
    let settings: TranslationSettings = serde_json::from_str(&content)?;

    // バリデーション
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!("Settings loaded successfully: {:?}", settings);

    Ok(settings)
}
