//! 字段与表单校验
//!
//! 校验一律基于裁剪后的值；原始值照常投递。两套规则由
//! [`ValidationRules`] 选择：声明式约束链（token 后端页面）与
//! 最小长度阈值（中继页面）。

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FieldId, FieldSpec, FieldValidationResult, FormProfile, FormValues, ValidationRules};

/// 邮箱格式：非空白非 @ 段 + "@" + 非空白非 @ 段 + "." + 非空白段
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// 校验邮箱格式（值须已裁剪）
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// 校验单个字段
///
/// 返回的结果是临时值：每次触发（blur、input、submit）都会重算，
/// 不做持久化。
#[must_use]
pub fn validate_field(
    spec: &FieldSpec,
    raw_value: &str,
    rules: ValidationRules,
) -> FieldValidationResult {
    let value = raw_value.trim();

    match rules {
        ValidationRules::Declared => validate_declared(spec, value),
        ValidationRules::MinimumLengths => validate_minimums(spec, value),
    }
}

/// 声明式约束链：必填 → 邮箱格式 → 最大长度，命中即止
fn validate_declared(spec: &FieldSpec, value: &str) -> FieldValidationResult {
    if spec.required && value.is_empty() {
        return FieldValidationResult::invalid(spec.id, format!("{} is required.", spec.id.label()));
    }

    if spec.id == FieldId::Email && !value.is_empty() {
        if !is_valid_email(value) {
            return FieldValidationResult::invalid(spec.id, "Please enter a valid email address.");
        }
    } else if let Some(max) = spec.max_len {
        if value.chars().count() > max {
            return FieldValidationResult::invalid(
                spec.id,
                format!("{} must be less than {max} characters.", spec.id.label()),
            );
        }
    }

    FieldValidationResult::valid(spec.id)
}

/// 最小长度阈值 + 邮箱格式；每字段至多一条消息
fn validate_minimums(spec: &FieldSpec, value: &str) -> FieldValidationResult {
    if spec.id == FieldId::Email {
        if value.is_empty() {
            return FieldValidationResult::invalid(spec.id, "Please enter your email address");
        }
        if !is_valid_email(value) {
            return FieldValidationResult::invalid(spec.id, "Please enter a valid email address");
        }
        return FieldValidationResult::valid(spec.id);
    }

    if let Some(min) = spec.min_len {
        if value.chars().count() < min {
            return FieldValidationResult::invalid(spec.id, minimum_message(spec.id, min));
        }
    } else if spec.required && value.is_empty() {
        return FieldValidationResult::invalid(spec.id, format!("{} is required.", spec.id.label()));
    }

    FieldValidationResult::valid(spec.id)
}

fn minimum_message(field: FieldId, min: usize) -> String {
    match field {
        FieldId::Name => format!("Please enter your full name (at least {min} characters)"),
        FieldId::Subject => format!("Please enter a subject (at least {min} characters)"),
        FieldId::Message => format!("Please enter your message (at least {min} characters)"),
        FieldId::Email => format!("Please enter your email address (at least {min} characters)"),
    }
}

/// 表单级校验：访问全部字段，逐字段给出结果
///
/// 提交只有在每个字段各自通过时才被放行；调用方负责把无效字段
/// 标记到视图并汇总横幅。
#[must_use]
pub fn validate_form(profile: &FormProfile, values: &FormValues) -> Vec<FieldValidationResult> {
    profile
        .fields
        .iter()
        .map(|spec| validate_field(spec, values.value_of(spec.id), profile.rules))
        .collect()
}
