use serde::{Deserialize, Serialize};

/// Запрос массовой операции: нормализованный список выбранных id.
/// Сервер нормализует его ещё раз — клиентскому payload не доверяем.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkRequest {
    pub ids: Vec<i64>,
}

/// Отказ по одной строке массовой операции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: i64,
    pub reason: String,
}

/// Итог массовой операции.
///
/// Операция идёт по строкам последовательно; отказ по строке (политика,
/// авторизация, отсутствие записи) попадает в `failed` и не прерывает
/// остальных. После полного успеха владелец очищает выбор, после
/// частичного — оставляет выбранными только `failed_ids`, чтобы
/// пользователь мог повторить.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkReport {
    pub succeeded: Vec<i64>,
    pub failed: Vec<BulkFailure>,
}

impl BulkReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ok(&mut self, id: i64) {
        self.succeeded.push(id);
    }

    pub fn record_failure(&mut self, id: i64, reason: impl Into<String>) {
        self.failed.push(BulkFailure {
            id,
            reason: reason.into(),
        });
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<i64> {
        self.failed.iter().map(|f| f.id).collect()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Короткая сводка для пользователя
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!("Готово: {}", self.succeeded.len())
        } else {
            format!(
                "Готово: {}, с ошибкой: {}",
                self.succeeded.len(),
                self.failed.len()
            )
        }
    }
}

/// Предохранитель размера выбора: проверяется до начала построчной
/// работы, одним сообщением валидации.
pub fn check_limit(count: usize, max: usize) -> Result<(), String> {
    if count > max {
        return Err(format!(
            "Выбрано слишком много элементов: {} (максимум {})",
            count, max
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_failure_report() {
        // выбор {10, 11, 12}, строка 11 не прошла авторизацию
        let mut report = BulkReport::new();
        report.record_ok(10);
        report.record_failure(11, "unauthorized");
        report.record_ok(12);

        assert!(!report.all_succeeded());
        assert_eq!(report.succeeded, vec![10, 12]);
        assert_eq!(report.failed_ids(), vec![11]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.summary(), "Готово: 2, с ошибкой: 1");
    }

    #[test]
    fn test_full_success() {
        let mut report = BulkReport::new();
        report.record_ok(1);
        report.record_ok(2);
        assert!(report.all_succeeded());
        assert!(report.failed_ids().is_empty());
        assert_eq!(report.summary(), "Готово: 2");
    }

    #[test]
    fn test_report_wire_format() {
        // формат общий для backend-ответа и frontend-разбора
        let mut report = BulkReport::new();
        report.record_ok(10);
        report.record_failure(11, "unauthorized");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "succeeded": [10],
                "failed": [{"id": 11, "reason": "unauthorized"}]
            })
        );

        let parsed: BulkReport = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_limit_gate() {
        assert!(check_limit(10, 10).is_ok());
        assert!(check_limit(0, 10).is_ok());
        let err = check_limit(11, 10).unwrap_err();
        assert!(err.contains("11"));
        assert!(err.contains("10"));
    }
}
