use super::*;
use crate::state::session::{landing_route, ADMIN_EMAIL, ADMIN_PHONE, ADMIN_ROUTE, STUDENT_ROUTE};

#[test]
fn validate_login_trims_both_fields() {
    assert_eq!(
        validate_login("  a@b.com ", " 9000000001 "),
        Ok(LoginRequest { email: "a@b.com".to_owned(), phone: "9000000001".to_owned() })
    );
}

#[test]
fn validate_login_requires_email_then_phone() {
    assert_eq!(validate_login("  ", "9000000001"), Err("Please enter your email."));
    assert_eq!(validate_login("a@b.com", ""), Err("Please enter your phone number."));
}

#[test]
fn admin_credentials_land_on_admin_page() {
    let request = validate_login(ADMIN_EMAIL, ADMIN_PHONE).unwrap();
    assert_eq!(landing_route(&request.email, &request.phone), ADMIN_ROUTE);
    assert_eq!(landing_route("asha@example.com", ADMIN_PHONE), STUDENT_ROUTE);
}
