use super::*;

fn row(email: &str, phone: &str) -> WithdrawalRow {
    WithdrawalRow {
        id: "w1".to_owned(),
        amount: "150".to_owned(),
        status: "pending".to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
        date: "-".to_owned(),
    }
}

#[test]
fn contact_cell_joins_phone_when_known() {
    assert_eq!(contact_cell(&row("a@b.com", "90")), "a@b.com • 90");
    assert_eq!(contact_cell(&row("a@b.com", "")), "a@b.com");
}

#[test]
fn status_class_is_case_insensitive() {
    assert_eq!(status_class("Approved"), "pill pill--success");
    assert_eq!(status_class("REJECTED"), "pill pill--error");
    assert_eq!(status_class("pending"), "pill pill--pending");
    assert_eq!(status_class("-"), "pill pill--pending");
}
