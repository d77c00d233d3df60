pub mod translation;

pub use translation::{
    CommandError, TranslationCommand, TranslationSettings, merge_translation, source_texts,
    translated_column_name, truncate_rows,
};
