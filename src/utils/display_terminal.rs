//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 시작과 시드 가져오기 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료 요약을 시각적으로 표현합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// 텍스트는 50칸 안에서 중앙 정렬됩니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                  ACSAMS Starting                 ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    println!("{}", boxed_title(title));
}

fn boxed_title(title: &str) -> String {
    let content_width = 50;
    let border = "═".repeat(content_width);

    format!("╔{border}╗\n║{title:^content_width$}║\n╚{border}╝")
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Connecting storage
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
///
/// ```text
/// ✓ Step 1: Storage ready (4 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 표시합니다
///
/// ```text
///    ├─ users: MongoDB
///    ├─ refresh tokens: Redis
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 서버 시작 요약을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║               🎉 ACSAMS READY                    ║
/// ╚══════════════════════════════════════════════════╝
///    📦 Storage: memory
///    🌐 Listening: http://127.0.0.1:8080
///    📖 API Docs: http://127.0.0.1:8080/docs
/// ```
pub fn print_final_summary(storage: &str, bind_address: &str) {
    println!();
    print_boxed_title("🎉 ACSAMS READY");
    println!("   📦 Storage: {}", storage);
    println!("   🌐 Listening: http://{}", bind_address);
    println!("   📖 API Docs: http://{}/docs", bind_address);
    println!();
}

/// 시드 가져오기 결과를 출력합니다
pub fn print_seed_report(inserted: usize, skipped: usize) {
    print_sub_task("inserted", &inserted.to_string());
    print_sub_task("skipped", &skipped.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_is_centered() {
        let boxed = boxed_title("ACSAMS");
        let lines: Vec<&str> = boxed.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), 52);
        assert_eq!(lines[1].chars().count(), 52);
        assert!(lines[1].contains("ACSAMS"));
    }
}
