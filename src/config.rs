//! 翻訳マネージャーの設定
/// 設定ファイルの読み込み
mod loader;
/// 設定の型とバリデーション
mod types;

pub use loader::load_settings;
pub use types::{
    ConfigError,
    TranslationSettings,
    ValidationError,
};
