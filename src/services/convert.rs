//! Mapping between wire models and storage records.
//!
//! Optional text collapses the same way in both directions: an empty wire string is
//! stored as NULL and NULL comes back as an empty string.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{
        common::{
            format_iso_date, format_optional_timestamp, format_publish_date, parse_iso_date,
            parse_optional_timestamp,
        },
        Address, Author, Book, Customer, PersonName,
    },
    repository::{AuthorRecord, BookRecord, CustomerRecord},
};

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn cost_to_storage(cost: f64) -> AppResult<Decimal> {
    Decimal::from_f64(cost)
        .map(|cost| cost.round_dp(2))
        .ok_or_else(|| AppError::Constraint {
            field: "cost".to_string(),
            message: format!("{} is not a representable amount", cost),
        })
}

pub fn book_to_wire(record: BookRecord) -> Book {
    Book {
        isbn: record.isbn,
        name: record.name,
        tags: record.tags,
        author_name: record.author_name,
        date_of_publish: format_publish_date(record.date_of_publish),
        publishing_house: record.publishing_house,
        number_of_pages: record.number_of_pages,
        cost: record.cost.to_f64().unwrap_or_default(),
    }
}

pub fn book_to_storage(book: &Book) -> AppResult<BookRecord> {
    Ok(BookRecord {
        isbn: book.isbn.clone(),
        name: book.name.clone(),
        tags: book.tags.clone(),
        author_name: book.author_name.clone(),
        date_of_publish: parse_iso_date("date_of_publish", &book.date_of_publish)?,
        publishing_house: book.publishing_house.clone(),
        number_of_pages: book.number_of_pages,
        cost: cost_to_storage(book.cost)?,
    })
}

pub fn author_to_wire(record: AuthorRecord) -> Author {
    Author {
        id: record.id,
        name: PersonName {
            first_name: record.first_name,
            middle_name: text(record.middle_name),
            last_name: record.last_name,
        },
        dob: format_iso_date(record.dob),
        address: Address {
            unit: text(record.unit_no),
            street_name: text(record.street_name),
            city: text(record.city),
            state: text(record.state),
            country: text(record.country),
            zipcode: text(record.zipcode),
            landmark: text(record.landmark),
        },
        languages: record.languages,
    }
}

pub fn author_to_storage(author: &Author) -> AppResult<AuthorRecord> {
    Ok(AuthorRecord {
        id: author.id.clone(),
        first_name: author.name.first_name.clone(),
        middle_name: optional(&author.name.middle_name),
        last_name: author.name.last_name.clone(),
        dob: parse_iso_date("dob", &author.dob)?,
        unit_no: optional(&author.address.unit),
        street_name: optional(&author.address.street_name),
        city: optional(&author.address.city),
        state: optional(&author.address.state),
        country: optional(&author.address.country),
        zipcode: optional(&author.address.zipcode),
        landmark: optional(&author.address.landmark),
        languages: author.languages.clone(),
    })
}

pub fn customer_to_wire(record: CustomerRecord) -> Customer {
    Customer {
        email: record.email,
        name: PersonName {
            first_name: record.first_name,
            middle_name: text(record.middle_name),
            last_name: record.last_name,
        },
        phone_number: text(record.phone_number),
        dob: format_iso_date(record.dob),
        address: Address {
            unit: text(record.unit_no),
            street_name: text(record.street_name),
            city: text(record.city),
            state: text(record.state),
            country: text(record.country),
            zipcode: text(record.zipcode),
            landmark: text(record.landmark),
        },
        registration_date: format_optional_timestamp(record.registration_date),
        last_login: format_optional_timestamp(record.last_login),
        status: record.status,
        notes: text(record.notes),
        languages: record.languages,
    }
}

pub fn customer_to_storage(customer: &Customer) -> AppResult<CustomerRecord> {
    Ok(CustomerRecord {
        email: customer.email.clone(),
        first_name: customer.name.first_name.clone(),
        middle_name: optional(&customer.name.middle_name),
        last_name: customer.name.last_name.clone(),
        phone_number: optional(&customer.phone_number),
        dob: parse_iso_date("dob", &customer.dob)?,
        unit_no: optional(&customer.address.unit),
        street_name: optional(&customer.address.street_name),
        city: optional(&customer.address.city),
        state: optional(&customer.address.state),
        country: optional(&customer.address.country),
        zipcode: optional(&customer.address.zipcode),
        landmark: optional(&customer.address.landmark),
        registration_date: parse_optional_timestamp(
            "registration_date",
            &customer.registration_date,
        )?,
        last_login: parse_optional_timestamp("last_login", &customer.last_login)?,
        status: customer.status,
        notes: optional(&customer.notes),
        languages: customer.languages.clone(),
    })
}
