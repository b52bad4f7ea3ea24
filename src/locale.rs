use std::str::FromStr;

/// Language used for user-facing error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    pub fn login_required(self) -> &'static str {
        match self {
            Locale::Ko => "로그인이 필요합니다.",
            Locale::En => "Login required.",
        }
    }

    pub fn invalid_credentials(self) -> &'static str {
        match self {
            Locale::Ko => "이메일 또는 비밀번호가 올바르지 않습니다.",
            Locale::En => "Invalid email or password.",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" => Ok(Locale::Ko),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}
