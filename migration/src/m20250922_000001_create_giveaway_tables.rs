use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

/// Users (参与者)
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    TelegramId,
    Username,
    FirstName,
    CreatedAt,
}

/// Gifts (礼品目录)
#[derive(DeriveIden)]
enum Gifts {
    Table,
    Id,
    Emoji,
    Name,
    Rarity,
    Quantity,
    IsAvailable,
    CreatedAt,
}

/// Wins (中奖台账)
#[derive(DeriveIden)]
enum Wins {
    Table,
    Id,
    UserId,
    GiftId,
    TelegramId,
    Status,
    WonAt,
    FulfilledAt,
}

/// Jackpot Attempts (掷骰流水)
#[derive(DeriveIden)]
enum JackpotAttempts {
    Table,
    Id,
    UserId,
    DiceValue,
    IsJackpot,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始礼品目录（与 Mini App 展示一致）:
/// - 💎 Legendary Gift 限量1
/// - ⭐ Epic Gift 限量3
/// - 🎁 Rare Gift 限量5
/// - 🎀 Common Gift 限量10
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 枚举类型
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("gift_rarity"))
                    .values(vec![
                        Alias::new("common"),
                        Alias::new("rare"),
                        Alias::new("epic"),
                        Alias::new("legendary"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("win_status"))
                    .values(vec![Alias::new("pending"), Alias::new("fulfilled")])
                    .to_owned(),
            )
            .await?;

        // 参与者表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::TelegramId).big_integer().not_null())
                    .col(ColumnDef::new(Users::Username).string_len(255).null())
                    .col(ColumnDef::new(Users::FirstName).string_len(255).null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // telegram_id 唯一索引（外部身份一人一行）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_telegram_id_unique")
                    .table(Users::Table)
                    .col(Users::TelegramId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 礼品表
        manager
            .create_table(
                Table::create()
                    .table(Gifts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gifts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gifts::Emoji).string_len(16).not_null())
                    .col(ColumnDef::new(Gifts::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Gifts::Rarity)
                            .custom(Alias::new("gift_rarity"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Gifts::Quantity)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Gifts::Quantity).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Gifts::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Gifts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 中奖台账表
        manager
            .create_table(
                Table::create()
                    .table(Wins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wins::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Wins::GiftId).big_integer().not_null())
                    .col(ColumnDef::new(Wins::TelegramId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Wins::Status)
                            .custom(Alias::new("win_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wins::WonAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Wins::FulfilledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 发放端按外部身份与状态查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_wins_telegram_id")
                    .table(Wins::Table)
                    .col(Wins::TelegramId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_wins_status")
                    .table(Wins::Table)
                    .col(Wins::Status)
                    .to_owned(),
            )
            .await?;

        // 外键（不加 ON DELETE CASCADE，台账永远保留）
        manager
            .alter_table(
                Table::alter()
                    .table(Wins::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_wins_user")
                            .from_tbl(Wins::Table)
                            .from_col(Wins::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Wins::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_wins_gift")
                            .from_tbl(Wins::Table)
                            .from_col(Wins::GiftId)
                            .to_tbl(Gifts::Table)
                            .to_col(Gifts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 掷骰流水表
        manager
            .create_table(
                Table::create()
                    .table(JackpotAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JackpotAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JackpotAttempts::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JackpotAttempts::DiceValue)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JackpotAttempts::IsJackpot)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(JackpotAttempts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_jackpot_attempts_user")
                    .table(JackpotAttempts::Table)
                    .col(JackpotAttempts::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(JackpotAttempts::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_jackpot_attempts_user")
                            .from_tbl(JackpotAttempts::Table)
                            .from_col(JackpotAttempts::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 初始礼品目录（迁移只执行一次，直接插入）
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO gifts (emoji, name, rarity, quantity, is_available)
VALUES
 ('💎', 'Legendary Gift', 'legendary', 1, TRUE),
 ('⭐', 'Epic Gift', 'epic', 3, TRUE),
 ('🎁', 'Rare Gift', 'rare', 5, TRUE),
 ('🎀', 'Common Gift', 'common', 10, TRUE);
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：流水 -> 台账 -> 礼品 -> 参与者 -> 枚举类型
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(JackpotAttempts::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Wins::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Gifts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().if_exists().name(Alias::new("win_status")).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().if_exists().name(Alias::new("gift_rarity")).to_owned())
            .await?;

        Ok(())
    }
}
