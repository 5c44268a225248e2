use super::*;

fn filled() -> ContactForm {
    let mut form = ContactForm::new();
    form.set(Field::Name, "Ada Lovelace");
    form.set(Field::Email, "ada@example.org");
    form.set(Field::Subject, "Thermostat");
    form.set(Field::Message, "  Does it speak Zigbee?  ");
    form
}

#[test]
fn valid_submit_calls_handler_once_with_verbatim_fields() {
    let mut form = filled();
    let mut handler = RecordingSubmitHandler::default();
    form.submit(&mut handler).unwrap();
    assert_eq!(handler.received.len(), 1);
    assert_eq!(
        handler.received[0],
        ContactPayload {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.org".to_owned(),
            subject: "Thermostat".to_owned(),
            message: "  Does it speak Zigbee?  ".to_owned(),
        }
    );
    assert_eq!(form.value(Field::Name), "", "form clears after submit");
}

#[test]
fn missing_fields_are_marked_and_nothing_is_sent() {
    let mut form = filled();
    form.set(Field::Subject, "   ");
    form.set(Field::Email, "not-an-email");
    let mut handler = RecordingSubmitHandler::default();
    let err = form.submit(&mut handler).unwrap_err();
    assert_eq!(err, FormError::Invalid(vec![Field::Email, Field::Subject]));
    assert_eq!(form.invalid_fields(), &[Field::Email, Field::Subject]);
    assert!(handler.received.is_empty());
    assert_eq!(err.to_string(), "invalid fields: email, subject");
}

#[test]
fn editing_a_field_clears_its_mark() {
    let mut form = ContactForm::new();
    let _ = form.submit(&mut RecordingSubmitHandler::default());
    assert_eq!(form.invalid_fields().len(), 4);
    form.set(Field::Name, "Bob");
    assert!(!form.invalid_fields().contains(&Field::Name));
}

#[test]
fn email_shape_check() {
    assert!(looks_like_email("a@b.co"));
    assert!(!looks_like_email("a@b"));
    assert!(!looks_like_email("@b.co"));
    assert!(!looks_like_email("a@@b.co"));
    assert!(!looks_like_email("a b@c.de"));
}
