use std::collections::HashMap;

/// Очередь оптимистичных переключателей.
///
/// UI переворачивает тумблер сразу, подтверждение приходит после
/// round-trip на сервер. Инвариант: не более одного запроса в полёте на
/// строку; повторные клики по той же строке встают в очередь и уходят
/// строго в порядке поступления — так устаревшее подтверждение не может
/// перетереть более поздний клик.
#[derive(Debug, Clone, Default)]
pub struct ToggleQueue {
    lanes: HashMap<i64, Lane>,
}

#[derive(Debug, Clone, Default)]
struct Lane {
    in_flight: bool,
    queued: Vec<bool>,
}

impl ToggleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Пользователь кликнул по переключателю строки `id`.
    ///
    /// Возвращает `Some(value)`, если запрос нужно отправить сейчас;
    /// `None` — запрос уже в полёте, значение поставлено в очередь.
    pub fn request(&mut self, id: i64, desired: bool) -> Option<bool> {
        let lane = self.lanes.entry(id).or_default();
        if lane.in_flight {
            lane.queued.push(desired);
            None
        } else {
            lane.in_flight = true;
            Some(desired)
        }
    }

    /// Сервер подтвердил текущий запрос по строке `id`.
    ///
    /// Возвращает следующее значение из очереди, которое нужно отправить
    /// тем же порядком, или `None`, если очередь пуста.
    pub fn settle(&mut self, id: i64) -> Option<bool> {
        let Some(lane) = self.lanes.get_mut(&id) else {
            return None;
        };
        if lane.queued.is_empty() {
            self.lanes.remove(&id);
            None
        } else {
            // in_flight остаётся true: следующий запрос уходит сразу
            Some(lane.queued.remove(0))
        }
    }

    /// Запрос по строке `id` завершился ошибкой: сбрасываем полосу
    /// целиком, накопленные намерения отменяются, UI откатывает значение.
    pub fn fail(&mut self, id: i64) {
        self.lanes.remove(&id);
    }

    pub fn in_flight(&self, id: i64) -> bool {
        self.lanes.get(&id).map(|l| l.in_flight).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_goes_out_immediately() {
        let mut queue = ToggleQueue::new();
        assert_eq!(queue.request(1, true), Some(true));
        assert!(queue.in_flight(1));
    }

    #[test]
    fn test_overlapping_requests_are_queued_in_order() {
        let mut queue = ToggleQueue::new();
        assert_eq!(queue.request(1, true), Some(true));
        assert_eq!(queue.request(1, false), None);
        assert_eq!(queue.request(1, true), None);

        // подтверждения высвобождают очередь строго по порядку
        assert_eq!(queue.settle(1), Some(false));
        assert_eq!(queue.settle(1), Some(true));
        assert_eq!(queue.settle(1), None);
        assert!(!queue.in_flight(1));
    }

    #[test]
    fn test_rows_are_independent() {
        let mut queue = ToggleQueue::new();
        assert_eq!(queue.request(1, true), Some(true));
        assert_eq!(queue.request(2, false), Some(false));
        assert_eq!(queue.settle(1), None);
        assert!(queue.in_flight(2));
    }

    #[test]
    fn test_fail_clears_lane() {
        let mut queue = ToggleQueue::new();
        queue.request(1, true);
        queue.request(1, false);
        queue.fail(1);
        assert!(!queue.in_flight(1));
        // после сброса новый клик снова уходит сразу
        assert_eq!(queue.request(1, false), Some(false));
    }

    #[test]
    fn test_settle_without_request_is_noop() {
        let mut queue = ToggleQueue::new();
        assert_eq!(queue.settle(42), None);
    }
}
