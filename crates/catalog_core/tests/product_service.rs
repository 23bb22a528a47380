use catalog_core::db::open_db_in_memory;
use catalog_core::{ProductInput, ServiceError, SqliteCatalog};

fn input(name: &str, price: Option<f64>) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        price,
    }
}

#[test]
fn product_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).products().unwrap();

    let created = service.create(input("Notebook", Some(4500.0))).unwrap();
    assert!(uuid::Uuid::parse_str(&created.id).is_ok());
    assert_eq!(service.find_by_id(&created.id).unwrap(), Some(created.clone()));

    let replaced = service
        .replace(&created.id, input("Notebook Pro", Some(5200.5)))
        .unwrap();
    assert_eq!(replaced.id, created.id);
    assert_eq!(
        service.find_by_id(&created.id).unwrap().unwrap().name,
        "Notebook Pro"
    );

    service.delete(&created.id).unwrap();
    assert_eq!(service.find_by_id(&created.id).unwrap(), None);
    service.delete(&created.id).unwrap();
}

#[test]
fn create_assigns_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).products().unwrap();

    let first = service.create(input("Pen", None)).unwrap();
    let second = service.create(input("Pen", None)).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(service.search_by_name("Pen").unwrap().len(), 2);
    assert!(service.search_by_name("Pencil").unwrap().is_empty());
}

#[test]
fn replace_of_unknown_id_creates_the_product() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).products().unwrap();

    service.replace("external-42", input("Mouse", Some(80.0))).unwrap();
    let stored = service.find_by_id("external-42").unwrap().unwrap();
    assert_eq!(stored.price, Some(80.0));
}

#[test]
fn invalid_input_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).products().unwrap();

    assert!(matches!(
        service.create(input(" ", None)),
        Err(ServiceError::Validation(_))
    ));
    assert!(matches!(
        service.create(input("Cable", Some(-1.0))),
        Err(ServiceError::Validation(_))
    ));
}
