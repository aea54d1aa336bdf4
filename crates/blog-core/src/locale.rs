//! Client-facing messages for the supported interface languages.

use std::fmt;
use std::str::FromStr;

/// Interface language for not-found and confirmation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Uk,
    En,
}

impl Locale {
    pub fn category_not_found(self) -> &'static str {
        match self {
            Locale::Uk => "Категорію не знайдено",
            Locale::En => "Category not found",
        }
    }

    pub fn category_deleted(self) -> &'static str {
        match self {
            Locale::Uk => "Категорію видалено",
            Locale::En => "Category deleted",
        }
    }

    pub fn post_not_found(self) -> &'static str {
        match self {
            Locale::Uk => "Пост не знайдено",
            Locale::En => "Post not found",
        }
    }

    pub fn post_deleted(self) -> &'static str {
        match self {
            Locale::Uk => "Пост видалено",
            Locale::En => "Post deleted",
        }
    }

    pub fn category_in_use(self) -> &'static str {
        match self {
            Locale::Uk => "Категорію не можна видалити: вона містить пости або підкатегорії",
            Locale::En => "Category cannot be deleted while it has posts or subcategories",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uk" | "uk-ua" | "uk_ua" => Ok(Locale::Uk),
            "en" | "en-us" | "en_us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale `{other}`")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Uk => f.write_str("uk"),
            Locale::En => f.write_str("en"),
        }
    }
}
