//! 表单字段校验
//!
//! 长度一律按 Unicode 字符计数，错误信息直接面向用户。

use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static STUDENT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,20}$").expect("Invalid student number regex"));

pub const COURSE_NAME_ERROR: &str = "Kurssin nimen on oltava 3-100 merkkiä.";
pub const COURSE_DESCRIPTION_ERROR: &str = "Kurssikuvauksen on oltava 1-2000 merkkiä.";
pub const FIRST_NAME_ERROR: &str = "Etunimen on oltava 1-50 merkkiä.";
pub const LAST_NAME_ERROR: &str = "Sukunimen on oltava 1-50 merkkiä.";
pub const STUDENT_NUMBER_ERROR: &str = "Opiskelijanumeron on oltava 1-20 numeroa.";
pub const QUESTION_ERROR: &str = "Tehtävänannon on oltava 1-1000 merkkiä.";
pub const CORRECT_ANSWER_ERROR: &str = "Oikean vastauksen on oltava 1-200 merkkiä.";
pub const ANSWER_ERROR: &str = "Vastauksen on oltava 1-200 merkkiä.";
pub const MATERIAL_TITLE_ERROR: &str = "Materiaalin otsikon on oltava 1-100 merkkiä.";
pub const MATERIAL_CONTENT_ERROR: &str = "Materiaalin sisällön on oltava 1-5000 merkkiä.";

/// 字符数是否落在闭区间内
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

fn check(value: &str, min: usize, max: usize, message: &'static str) -> Result<(), &'static str> {
    if length_between(value, min, max) {
        Ok(())
    } else {
        Err(message)
    }
}

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if !length_between(username, 3, 20) {
        return Err("Käyttäjätunnuksen on oltava 3-20 merkkiä.");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Käyttäjätunnus saa sisältää vain kirjaimia, numeroita, alaviivoja ja väliviivoja.");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    check(password, 8, 100, "Salasanan on oltava 8-100 merkkiä.")
}

pub fn validate_student_number(student_number: &str) -> Result<(), &'static str> {
    if STUDENT_NUMBER_RE.is_match(student_number) {
        Ok(())
    } else {
        Err(STUDENT_NUMBER_ERROR)
    }
}

/// 课程表单校验，返回全部错误
pub fn validate_course_form(name: &str, description: &str) -> Vec<String> {
    [
        check(name, 3, 100, COURSE_NAME_ERROR),
        check(description, 1, 2000, COURSE_DESCRIPTION_ERROR),
    ]
    .into_iter()
    .filter_map(|r| r.err().map(str::to_string))
    .collect()
}

/// 用户资料校验；仅学生需要学号
pub fn validate_userinfo(
    first_name: &str,
    last_name: &str,
    student_number: Option<&str>,
    is_student: bool,
) -> Vec<String> {
    let mut errors: Vec<String> = [
        check(first_name, 1, 50, FIRST_NAME_ERROR),
        check(last_name, 1, 50, LAST_NAME_ERROR),
    ]
    .into_iter()
    .filter_map(|r| r.err().map(str::to_string))
    .collect();

    if is_student
        && let Err(e) = validate_student_number(student_number.unwrap_or_default())
    {
        errors.push(e.to_string());
    }

    errors
}

pub fn validate_exercise_form(question: &str, correct_answer: &str) -> Vec<String> {
    [
        check(question, 1, 1000, QUESTION_ERROR),
        check(correct_answer, 1, 200, CORRECT_ANSWER_ERROR),
    ]
    .into_iter()
    .filter_map(|r| r.err().map(str::to_string))
    .collect()
}

pub fn validate_answer(answer: &str) -> Result<(), &'static str> {
    check(answer, 1, 200, ANSWER_ERROR)
}

pub fn validate_material_form(title: &str, content: &str) -> Vec<String> {
    [
        check(title, 1, 100, MATERIAL_TITLE_ERROR),
        check(content, 1, 5000, MATERIAL_CONTENT_ERROR),
    ]
    .into_iter()
    .filter_map(|r| r.err().map(str::to_string))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "ääk" 是 3 个字符、5 个字节
        assert!(length_between("ääk", 3, 3));
        assert!(!length_between("ää", 3, 100));
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("matti_m-1").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(21)).is_err());
        assert!(validate_username("matti meikä").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("salasana").is_ok());
        assert!(validate_password("lyhyt").is_err());
        assert!(validate_password(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_course_form_boundaries() {
        assert!(validate_course_form("abc", "d").is_empty());
        assert!(validate_course_form(&"a".repeat(100), &"d".repeat(2000)).is_empty());

        assert_eq!(validate_course_form("ab", "ok"), vec![COURSE_NAME_ERROR]);
        assert_eq!(
            validate_course_form(&"a".repeat(101), ""),
            vec![COURSE_NAME_ERROR, COURSE_DESCRIPTION_ERROR]
        );
        assert_eq!(
            validate_course_form("abc", &"d".repeat(2001)),
            vec![COURSE_DESCRIPTION_ERROR]
        );
    }

    #[test]
    fn test_userinfo_student_number_only_for_students() {
        assert!(validate_userinfo("Maija", "Meikäläinen", Some("012345"), true).is_empty());
        assert_eq!(
            validate_userinfo("Maija", "Meikäläinen", None, true),
            vec![STUDENT_NUMBER_ERROR]
        );
        assert_eq!(
            validate_userinfo("Maija", "Meikäläinen", Some("12a"), true),
            vec![STUDENT_NUMBER_ERROR]
        );
        assert!(validate_userinfo("Matti", "Opettaja", None, false).is_empty());
        assert_eq!(
            validate_userinfo("", &"x".repeat(51), Some("1"), true),
            vec![FIRST_NAME_ERROR, LAST_NAME_ERROR]
        );
    }

    #[test]
    fn test_exercise_and_material_forms() {
        assert!(validate_exercise_form("1 + 1?", "2").is_empty());
        assert_eq!(
            validate_exercise_form("", &"x".repeat(201)),
            vec![QUESTION_ERROR, CORRECT_ANSWER_ERROR]
        );
        assert!(validate_answer("2").is_ok());
        assert_eq!(validate_answer(""), Err(ANSWER_ERROR));
        assert!(validate_material_form("Luento", "Sisältö").is_empty());
        assert_eq!(
            validate_material_form(&"x".repeat(101), ""),
            vec![MATERIAL_TITLE_ERROR, MATERIAL_CONTENT_ERROR]
        );
    }
}
