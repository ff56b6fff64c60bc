//! Спам-эвристика для входящих комментариев.
//!
//! Никакого ML: сумма простых штрафов, отсечка по порогу. Оценка
//! сохраняется вместе с комментарием, чтобы модератор видел, почему
//! текст попал в спам.

/// Порог, начиная с которого комментарий сразу уходит в статус "спам"
pub const SPAM_THRESHOLD: f32 = 0.8;

const BANNED_PHRASES: &[&str] = &[
    "casino",
    "viagra",
    "crypto signals",
    "заработок без вложений",
    "быстрые деньги",
    "скидка 90%",
    "click here",
];

/// Оценить комментарий: 0.0 — чистый, 1.0 — точно спам
pub fn score(body: &str, author_name: &str) -> f32 {
    let mut score: f32 = 0.0;
    let body_lower = body.to_lowercase();

    // Ссылки: одна допустима, каждая следующая подозрительна
    let link_count = body_lower.matches("http://").count() + body_lower.matches("https://").count();
    if link_count > 1 {
        score += 0.4 * (link_count - 1) as f32;
    }

    // Стоп-фразы
    if BANNED_PHRASES.iter().any(|p| body_lower.contains(p)) {
        score += 0.6;
    }

    // Сплошной капс в достаточно длинном тексте
    let letters: Vec<char> = body.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 20 {
        let upper = letters.iter().filter(|c| c.is_uppercase()).count();
        if upper as f32 / letters.len() as f32 > 0.6 {
            score += 0.3;
        }
    }

    // Ссылка вместо имени автора
    if author_name.to_lowercase().contains("http") {
        score += 0.5;
    }

    score.clamp(0.0, 1.0)
}

pub fn is_spam(score: f32) -> bool {
    score >= SPAM_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_comment_scores_low() {
        let s = score("Отличная статья, спасибо! Вот похожий разбор: https://example.com/post", "Ира");
        assert!(s < SPAM_THRESHOLD, "score = {}", s);
    }

    #[test]
    fn test_link_farm_is_spam() {
        let s = score(
            "https://a.example https://b.example https://c.example https://d.example",
            "Гость",
        );
        assert!(is_spam(s), "score = {}", s);
    }

    #[test]
    fn test_banned_phrase_plus_link_is_spam() {
        let s = score(
            "Заработок без вложений! Подробности: https://x.example и https://y.example",
            "Гость",
        );
        assert!(is_spam(s), "score = {}", s);
    }

    #[test]
    fn test_shouting_alone_is_not_enough() {
        let s = score("ЭТО ПРОСТО НЕВЕРОЯТНО ХОРОШАЯ СТАТЬЯ СПАСИБО", "Гость");
        assert!(s > 0.0);
        assert!(!is_spam(s), "score = {}", s);
    }

    #[test]
    fn test_url_in_author_name_penalized() {
        let clean = score("Хороший текст", "Ира");
        let shady = score("Хороший текст", "https://spam.example");
        assert!(shady > clean);
    }

    #[test]
    fn test_score_is_clamped() {
        let s = score(
            "casino viagra https://a https://b https://c https://d https://e",
            "http://spam",
        );
        assert!((0.0..=1.0).contains(&s));
        assert_eq!(s, 1.0);
    }
}
