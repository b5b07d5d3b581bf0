use customer_groups_api::customer_groups::{
    BatchAddRequest, ValidationError,
    http::{AddCustomersBatchRequest, CustomerIdRef},
    validate_batch_add,
};

fn payload(ids: &[&str]) -> AddCustomersBatchRequest {
    AddCustomersBatchRequest {
        customer_ids: ids
            .iter()
            .map(|id| CustomerIdRef { id: id.to_string() })
            .collect(),
    }
}

#[test]
fn valid_payload_keeps_order_and_duplicates() {
    let request =
        validate_batch_add("G1", payload(&["C2", "C3", "C2"]), 10).expect("payload should be valid");

    assert_eq!(
        request,
        BatchAddRequest {
            group_id: "G1".to_string(),
            customer_ids: vec!["C2".to_string(), "C3".to_string(), "C2".to_string()],
        }
    );
}

#[test]
fn padded_ids_are_passed_through_unchanged() {
    let request = validate_batch_add(" G1 ", payload(&["  C1\t", "C2 "]), 10)
        .expect("padded ids are still ids");

    assert_eq!(request.group_id, " G1 ");
    assert_eq!(
        request.customer_ids,
        vec!["  C1\t".to_string(), "C2 ".to_string()]
    );
}

#[test]
fn empty_list_is_a_valid_request() {
    let request = validate_batch_add("G1", payload(&[]), 10).expect("empty batch should be valid");
    assert!(request.customer_ids.is_empty());
}

#[test]
fn blank_customer_id_is_rejected() {
    let err = validate_batch_add("G1", payload(&["C1", ""]), 10)
        .expect_err("empty id must be rejected");
    assert_eq!(err, ValidationError::new("customerIds[1].id cannot be empty"));

    let err = validate_batch_add("G1", payload(&[" \t "]), 10)
        .expect_err("whitespace id must be rejected");
    assert_eq!(err.to_string(), "customerIds[0].id cannot be empty");
}

#[test]
fn blank_group_id_is_rejected() {
    let err =
        validate_batch_add("   ", payload(&[]), 10).expect_err("blank group id must be rejected");
    assert_eq!(err.to_string(), "id is required");
}

#[test]
fn batch_size_limit_is_enforced() {
    assert!(validate_batch_add("G1", payload(&["C1", "C2", "C3"]), 3).is_ok());

    let err = validate_batch_add("G1", payload(&["C1", "C2", "C3"]), 2)
        .expect_err("batch over limit");
    assert_eq!(err.to_string(), "customerIds can contain up to 2 values");
}
