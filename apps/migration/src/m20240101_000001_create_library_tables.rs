use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

/// At most one open loan per copy.
const OPEN_LOAN_PER_COPY: &str = "CREATE UNIQUE INDEX IF NOT EXISTS ux_borrowed_books_open_copy \
     ON borrowed_books (copy_id) WHERE return_date IS NULL";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id(Users::Id))
                    .col(ColumnDef::new(Users::Uid).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(timestamp(Users::CreatedAt))
                    .col(timestamp(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(id(Books::Id))
                    .col(ColumnDef::new(Books::Title).string().not_null())
                    .col(ColumnDef::new(Books::Author).string().not_null())
                    .col(ColumnDef::new(Books::PublishedYear).integer().not_null())
                    .col(ColumnDef::new(Books::Isbn).string().not_null().default(""))
                    .col(timestamp(Books::CreatedAt))
                    .col(timestamp(Books::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookCopies::Table)
                    .if_not_exists()
                    .col(id(BookCopies::Id))
                    .col(ColumnDef::new(BookCopies::BookId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BookCopies::Status)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(timestamp(BookCopies::CreatedAt))
                    .col(timestamp(BookCopies::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_copies_book")
                            .from(BookCopies::Table, BookCopies::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BorrowedBooks::Table)
                    .if_not_exists()
                    .col(id(BorrowedBooks::Id))
                    .col(ColumnDef::new(BorrowedBooks::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BorrowedBooks::CopyId).big_integer().not_null())
                    .col(timestamp(BorrowedBooks::BorrowDate))
                    .col(
                        ColumnDef::new(BorrowedBooks::DueDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BorrowedBooks::ReturnDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp(BorrowedBooks::CreatedAt))
                    .col(timestamp(BorrowedBooks::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_borrowed_books_user")
                            .from(BorrowedBooks::Table, BorrowedBooks::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_borrowed_books_copy")
                            .from(BorrowedBooks::Table, BorrowedBooks::CopyId)
                            .to(BookCopies::Table, BookCopies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_book_copies_book_id")
                    .table(BookCopies::Table)
                    .col(BookCopies::BookId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_borrowed_books_user_id")
                    .table(BorrowedBooks::Table)
                    .col(BorrowedBooks::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Partial indexes are outside the portable index builder.
        manager
            .get_connection()
            .execute_unprepared(OPEN_LOAN_PER_COPY)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            BorrowedBooks::Table.into_iden(),
            BookCopies::Table.into_iden(),
            Books::Table.into_iden(),
            Users::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

fn id<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn timestamp<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Uid,
    Email,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
    Title,
    Author,
    PublishedYear,
    Isbn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BookCopies {
    Table,
    Id,
    BookId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BorrowedBooks {
    Table,
    Id,
    UserId,
    CopyId,
    BorrowDate,
    DueDate,
    ReturnDate,
    CreatedAt,
    UpdatedAt,
}
