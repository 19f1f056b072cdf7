use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A stored inventory record. Plain data: persistence lives in the
/// repository, not on the model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", default_value = 0)]
    #[serde(serialize_with = "serialize_price")]
    pub price: Decimal,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub type Product = Model;

// 固定两位小数输出，SQLite 读回的值会丢失 scale
fn serialize_price<S: serde::Serializer>(price: &Decimal, s: S) -> Result<S::Ok, S::Error> {
    let mut p = price.round_dp(2);
    p.rescale(2);
    Serialize::serialize(&p, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_serializes_with_two_places() {
        let p = Product { id: 1, name: "Widget".into(), price: Decimal::new(125, 1), quantity: 5 };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["price"], "12.50");

        let p = Product { price: Decimal::from(3), ..p };
        assert_eq!(serde_json::to_value(&p).unwrap()["price"], "3.00");
    }
}
