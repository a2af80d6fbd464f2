use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::image::{NewProductImage as DomainNewProductImage, StoredImage},
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, SearchParams, SortField,
    },
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    models::product_image::{NewProductImage as DbNewProductImage, ProductImage as DbProductImage},
    models::product_label::{NewProductLabel as DbNewProductLabel, ProductLabel as DbProductLabel},
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i64) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match product {
            Some(db_product) => {
                let mut items = attach_details(&mut conn, vec![db_product])?;
                Ok(items.pop())
            }
            None => Ok(None),
        }
    }

    fn search_products(&self, params: &SearchParams) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{product_labels, products};

        let mut conn = self.conn()?;

        let mut items = products::table.into_boxed::<Sqlite>();

        if let Some(term) = params.query.as_ref() {
            let pattern = like_pattern(term);
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .escape('\\')
                    .or(products::description.like(pattern).escape('\\')),
            );
        }

        if let Some(category_id) = params.category_id.as_ref() {
            items = items.filter(products::category_id.eq(category_id));
        }

        if let Some(min_price) = params.min_price {
            items = items.filter(products::price.ge(min_price));
        }

        if let Some(max_price) = params.max_price {
            items = items.filter(products::price.le(max_price));
        }

        if let Some(seller_id) = params.seller_id {
            items = items.filter(products::seller_id.eq(seller_id));
        }

        if let Some(available) = params.available {
            items = items.filter(products::is_available.eq(available));
        }

        if !params.labels.is_empty() {
            let labelled = product_labels::table
                .filter(product_labels::label.eq_any(&params.labels))
                .select(product_labels::product_id);
            items = items.filter(products::id.eq_any(labelled));
        }

        items = match (params.sort_field(), params.is_descending()) {
            (SortField::Name, false) => items.order(products::name.asc()),
            (SortField::Name, true) => items.order(products::name.desc()),
            (SortField::Price, false) => items.order(products::price.asc()),
            (SortField::Price, true) => items.order(products::price.desc()),
            (SortField::CreatedAt, false) => items.order(products::created_at.asc()),
            (SortField::CreatedAt, true) => items.order(products::created_at.desc()),
            (SortField::Id, false) => items.order(products::id.asc()),
            (SortField::Id, true) => items.order(products::id.desc()),
        };

        let db_products = items
            .then_order_by(products::id.asc())
            .offset(params.offset as i64)
            .limit(params.limit as i64)
            .load::<DbProduct>(&mut conn)?;

        attach_details(&mut conn, db_products)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_labels, products};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(products::table)
                .values(&DbNewProduct::from(new_product))
                .get_result::<DbProduct>(conn)?;

            if !new_product.labels.is_empty() {
                let labels: Vec<DbNewProductLabel> = new_product
                    .labels
                    .iter()
                    .map(|label| DbNewProductLabel {
                        product_id: created.id,
                        label: label.as_str(),
                    })
                    .collect();

                diesel::insert_into(product_labels::table)
                    .values(&labels)
                    .execute(conn)?;
            }

            let mut domain: DomainProduct = created.into();
            domain.labels = new_product.labels.clone();
            Ok(domain)
        })
    }

    fn add_product_images(&self, images: &[DomainNewProductImage]) -> RepositoryResult<usize> {
        use crate::schema::product_images;

        if images.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let rows: Vec<DbNewProductImage> = images.iter().map(DbNewProductImage::from).collect();

        let inserted = diesel::insert_into(product_images::table)
            .values(&rows)
            .execute(&mut conn)?;

        Ok(inserted)
    }

    fn delete_product(&self, product_id: i64) -> RepositoryResult<()> {
        use crate::schema::{product_images, product_labels, products};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(product_labels::table.filter(product_labels::product_id.eq(product_id)))
                .execute(conn)?;

            let deleted =
                diesel::delete(products::table.filter(products::id.eq(product_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

/// Substring pattern for `LIKE ... ESCAPE '\'` matching `term` literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Load labels and images for `db_products`, keeping their order.
fn attach_details(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    if db_products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i64> = db_products.iter().map(|product| product.id).collect();
    let mut labels = load_labels_for_products(conn, &product_ids)?;
    let mut images = load_images_for_products(conn, &product_ids)?;

    let mut domain_products = Vec::with_capacity(db_products.len());
    for db_product in db_products {
        let mut domain: DomainProduct = db_product.into();
        domain.labels = labels.remove(&domain.id).unwrap_or_default();
        domain.images = images.remove(&domain.id).unwrap_or_default();
        domain_products.push(domain);
    }

    Ok(domain_products)
}

fn load_labels_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i64],
) -> RepositoryResult<HashMap<i64, Vec<String>>> {
    use crate::schema::product_labels;

    let rows = product_labels::table
        .filter(product_labels::product_id.eq_any(product_ids))
        .order(product_labels::id.asc())
        .load::<DbProductLabel>(conn)?;

    let mut map: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row.label);
    }

    Ok(map)
}

fn load_images_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i64],
) -> RepositoryResult<HashMap<i64, Vec<StoredImage>>> {
    use crate::schema::product_images;

    let rows = product_images::table
        .filter(product_images::product_id.eq_any(product_ids))
        .order((product_images::product_id.asc(), product_images::position.asc()))
        .load::<DbProductImage>(conn)?;

    let mut map: HashMap<i64, Vec<StoredImage>> = HashMap::new();
    for row in rows {
        let product_id = row.product_id;
        if let Some(image) = row.into_stored() {
            map.entry(product_id).or_default().push(image);
        }
    }

    Ok(map)
}
