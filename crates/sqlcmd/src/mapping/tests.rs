use super::*;

struct Account {
    id: i64,
    email: String,
    balance: Option<i64>,
}

fn account() -> Account {
    Account {
        id: 1,
        email: "a@example.com".to_string(),
        balance: None,
    }
}

#[test]
fn test_descriptor_defaults() {
    let descriptor = MappingDescriptor::<Account>::builder("accounts")
        .property(
            PropertyMapping::new("Id")
                .primary_key()
                .reader(|a: &Account| a.id),
        )
        .property(
            PropertyMapping::new("Email")
                .column("email_address")
                .reader(|a: &Account| a.email.clone()),
        )
        .build()
        .unwrap();

    assert_eq!(descriptor.table_name(), "accounts");
    assert!(descriptor.entity_name().ends_with("Account"));
    assert_eq!(descriptor.properties().len(), 2);

    let id = descriptor.property("Id").unwrap();
    assert_eq!(id.column_name(), "Id");
    assert!(id.is_primary_key());
    assert!(!id.is_auto_increment());

    let email = descriptor.property("Email").unwrap();
    assert_eq!(email.column_name(), "email_address");
    assert!(email.can_read());
    assert!(!email.can_write());
    assert!(descriptor.property("Missing").is_none());
}

#[test]
fn test_zero_keys_is_valid() {
    let descriptor = MappingDescriptor::<Account>::builder("audit.account_log")
        .property(
            PropertyMapping::new("Email")
                .reader(|a: &Account| a.email.clone()),
        )
        .build()
        .unwrap();
    assert_eq!(descriptor.key_properties().count(), 0);
    assert_eq!(descriptor.value_properties().count(), 1);
}

#[test]
fn test_reader_and_writer() {
    let balance = PropertyMapping::new("Balance")
        .reader(|a: &Account| a.balance)
        .writer(|a: &mut Account, v| {
            a.balance = Some(v.try_into()?);
            Ok(())
        });

    let mut a = account();
    assert_eq!(balance.get_value(&a), Some(Value::Null));

    balance.set_value(&mut a, Value::I32(250)).unwrap();
    assert_eq!(a.balance, Some(250));
    assert_eq!(balance.get_value(&a), Some(Value::I64(250)));
}

#[test]
fn test_unreadable_property() {
    let hidden = PropertyMapping::<Account>::new("Secret");
    let mut a = account();
    assert!(!hidden.can_read());
    assert_eq!(hidden.get_value(&a), None);
    assert!(!hidden.can_write());

    let err = hidden.set_value(&mut a, Value::Null).unwrap_err();
    assert!(err.is_mapping());
    assert!(err.to_string().contains("property 'Secret' has no writer"));
}

#[test]
fn test_read_only_fn_access_rejects_write() {
    let access = FnAccess::new().with_reader(|a: &Account| Some(a.id.into()));
    let mut a = account();
    assert!(access.can_read());
    assert!(!access.can_write());

    let err = access.set_value(&mut a, Value::I64(2)).unwrap_err();
    assert!(err.is_mapping());
    assert_eq!(a.id, 1);
}

struct EmailAccess;

impl ValueAccess<Account> for EmailAccess {
    fn get_value(&self, entity: &Account) -> Option<Value> {
        (!entity.email.is_empty()).then(|| Value::from(entity.email.as_str()))
    }

    fn set_value(&self, entity: &mut Account, value: Value) -> CommandResult<()> {
        entity.email = value.try_into()?;
        Ok(())
    }
}

#[test]
fn test_custom_accessor() {
    let email = PropertyMapping::new("Email").accessor(EmailAccess);
    let mut a = account();
    assert!(email.can_read());
    assert!(email.can_write());

    email.set_value(&mut a, Value::from("b@example.com")).unwrap();
    assert_eq!(a.email, "b@example.com");

    a.email.clear();
    assert_eq!(email.get_value(&a), None);
}

#[test]
fn test_build_rejects_bad_identifiers() {
    let bad_table = MappingDescriptor::<Account>::builder("my table").build();
    assert!(matches!(bad_table, Err(CommandError::InvalidIdentifier(_))));

    let bad_property = MappingDescriptor::<Account>::builder("accounts")
        .property(PropertyMapping::new("e-mail"))
        .build();
    assert!(bad_property.is_err());

    let bad_column = MappingDescriptor::<Account>::builder("accounts")
        .property(PropertyMapping::new("Email").column("1email"))
        .build();
    assert!(bad_column.is_err());
}

#[test]
fn test_build_accepts_quoted_column() {
    let descriptor = MappingDescriptor::<Account>::builder("dbo.\"Accounts\"")
        .property(PropertyMapping::new("Email").column("\"E-Mail\""))
        .build()
        .unwrap();
    assert_eq!(descriptor.properties()[0].column_name(), "\"E-Mail\"");
}

#[test]
fn test_build_rejects_duplicate_property() {
    let result = MappingDescriptor::<Account>::builder("accounts")
        .property(PropertyMapping::new("Id").primary_key())
        .property(PropertyMapping::new("Id").column("account_id"))
        .build();
    let err = result.unwrap_err();
    assert!(err.to_string().contains("duplicate property 'Id'"));
}
