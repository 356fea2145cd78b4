use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Teacher, // 教师
    Student, // 学生
}

impl UserRole {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Student]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: teacher, student"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户资料（姓名、学号）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_number: Option<String>,
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub profile: UserProfile,
    #[ts(skip)]
    pub token_version: i32,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 用户资料是否已填写完整
    ///
    /// 学生还需要学号，教师只需要姓名。
    pub fn has_userinfo(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        filled(&self.profile.first_name)
            && filled(&self.profile.last_name)
            && (self.role != UserRole::Student || filled(&self.profile.student_number))
    }

    /// 显示用的全名，"名 姓"
    pub fn full_name(&self) -> String {
        full_name(
            self.profile.first_name.as_deref(),
            self.profile.last_name.as_deref(),
        )
    }
}

/// 拼接姓名，缺失的部分按空字符串处理
pub fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    format!(
        "{} {}",
        first_name.unwrap_or_default(),
        last_name.unwrap_or_default()
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, profile: UserProfile) -> User {
        User {
            id: 1,
            username: "maija".to_string(),
            password_hash: String::new(),
            role,
            profile,
            token_version: 0,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_role_round_trip_strings() {
        assert_eq!("teacher".parse::<UserRole>(), Ok(UserRole::Teacher));
        assert_eq!(UserRole::Student.to_string(), "student");
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_has_userinfo_requires_student_number_for_students() {
        let names = UserProfile {
            first_name: Some("Maija".to_string()),
            last_name: Some("Meikäläinen".to_string()),
            student_number: None,
        };
        assert!(user(UserRole::Teacher, names.clone()).has_userinfo());
        assert!(!user(UserRole::Student, names.clone()).has_userinfo());

        let with_number = UserProfile {
            student_number: Some("012345678".to_string()),
            ..names
        };
        assert!(user(UserRole::Student, with_number).has_userinfo());
        assert!(!user(UserRole::Teacher, UserProfile::default()).has_userinfo());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name(Some("Maija"), Some("Meikäläinen")), "Maija Meikäläinen");
        assert_eq!(full_name(None, Some("Meikäläinen")), "Meikäläinen");
        assert_eq!(full_name(None, None), "");
    }
}
