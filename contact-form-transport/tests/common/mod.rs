//! 共享测试工具和辅助函数

#![allow(dead_code)]

use contact_form_transport::Submission;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_endpoint {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 生成带唯一主题的测试提交，便于在收件箱里辨认并清理
pub fn test_submission() -> Submission {
    let uuid = uuid::Uuid::new_v4();
    Submission {
        name: "Integration Test".to_string(),
        email: "integration-test@example.com".to_string(),
        subject: format!("_test-{}", &uuid.to_string()[..8]),
        message: "Automated transport integration test. Safe to delete.".to_string(),
        extra: Vec::new(),
    }
}

/// 生成带 honeypot 字段的测试提交
pub fn test_submission_with_honeypot() -> Submission {
    let mut submission = test_submission();
    submission.extra.push(("website".to_string(), String::new()));
    submission
}
