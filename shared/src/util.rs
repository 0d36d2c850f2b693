use chrono::NaiveDate;

/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's date in local time, the anchor of every simulated billing schedule
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Generate an opaque identifier for line items and addons
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_now_millis_positive() {
        assert!(now_millis() > 1_704_067_200_000);
    }
}
