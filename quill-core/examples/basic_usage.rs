use quill_core::{
    alias, col, col_as, columns, constant, desc, eq, from, from_subselect, func, group_by, gt,
    in_, left_join, lte, order_by, placeholder, select, where_, window, Expression,
};

fn main() {
    // Plain select with a bind parameter
    let simple = select(
        columns([
            col("id"),
            col_as("generated_name", "name"),
            alias(func("coalesce", [col("location"), constant("earth")]), "location"),
        ]),
        [
            from([col("items")]),
            where_([eq(col("id"), placeholder())]),
            order_by(["created_at"]),
        ],
    );

    println!("SELECT SQL: {}", simple.to_sql());

    // Windowed subselect used as a table, clauses added out of order
    let ranked = select(
        columns([
            window("row_number()", order_by([desc("created_at")])).as_alias("row"),
            col_as("uu.id", "id"),
        ]),
        [
            where_([eq(col("uu.user_id"), placeholder())]),
            from([col_as("user_urls", "uu")]),
        ],
    );

    let paged = select(
        columns([col("uu.*")]),
        [
            group_by(["uu.id"]),
            where_([gt(col("uu.row"), placeholder()), lte(col("uu.row"), placeholder())]),
            left_join(col_as("tags", "t"), [eq(col("t.user_url_id"), col("uu.id"))]),
            from_subselect(ranked, "uu"),
            where_([in_(col("t.name"), placeholder())]),
        ],
    );

    println!("Paged SQL: {}", paged.to_sql());

    match paged.validate() {
        Ok(()) => println!("Paged statement is well formed"),
        Err(err) => println!("Paged statement has a problem: {}", err),
    }
}
