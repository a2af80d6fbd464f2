use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_labels)]
pub struct ProductLabel {
    pub id: i64,
    pub product_id: i64,
    pub label: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_labels)]
pub struct NewProductLabel<'a> {
    pub product_id: i64,
    pub label: &'a str,
}
