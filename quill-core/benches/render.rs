use criterion::{criterion_group, criterion_main, Criterion};
use quill_core::{
    col, col_as, columns, eq, from, from_subselect, group_by, gt, in_, join, left_join, lte,
    order_by, placeholder, select, where_, window, Expression, Statement,
};
use std::hint::black_box;

fn paged_user_urls() -> Statement {
    let inner = select(
        columns([
            window("row_number()", order_by(["uu.id"])).as_alias("row"),
            col_as("uu.id", "id"),
            col_as("uu.title", "title"),
            col_as("u.id", "url.id"),
            col_as("u.url", "url.url"),
            col_as("u.title", "url.title"),
            col_as("uu.user_id", "user.id"),
            col_as("uu.favorite", "favorite"),
            col_as("uu.created_at", "created_at"),
            col_as("uu.updated_at", "updated_at"),
        ]),
        [
            from([col_as("user_urls", "uu")]),
            join(col_as("urls", "u"), [eq(col("u.id"), col("uu.url_id"))]),
            where_([eq(col("uu.user_id"), placeholder())]),
        ],
    );

    select(
        columns([col("uu.*")]),
        [
            from_subselect(inner, "uu"),
            left_join(
                col_as("user_url_tags", "ut"),
                [eq(col("ut.user_url_id"), col("uu.id"))],
            ),
            left_join(col_as("tags", "t"), [eq(col("t.id"), col("ut.tag_id"))]),
            where_([
                gt(col("uu.row"), placeholder()),
                lte(col("uu.row"), placeholder()),
                in_(col("t.name"), placeholder()),
            ]),
            group_by(["uu.id"]),
        ],
    )
}

fn bench_render(c: &mut Criterion) {
    let statement = paged_user_urls();

    c.bench_function("render_windowed_subselect", |b| {
        b.iter(|| black_box(&statement).to_sql())
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
