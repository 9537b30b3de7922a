use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["cafemap"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["cafemap", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["cafemap", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_regions_and_stats_commands() {
    let cli = Cli::try_parse_from(["cafemap", "regions"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Regions)));

    let cli = Cli::try_parse_from(["cafemap", "stats"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Stats)));
}

#[test]
fn test_expand_without_filters_defaults_to_everything() {
    let cli = Cli::try_parse_from(["cafemap", "expand"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Expand {
            city: None,
            district: None,
            ref categories,
            dry_run: false,
        }) if categories.is_empty()
    ));
}

#[test]
fn test_expand_with_city_and_district() {
    let cli = Cli::try_parse_from([
        "cafemap",
        "expand",
        "--city",
        "台北市",
        "--district",
        "大安區",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Expand {
            city: Some(ref c),
            district: Some(ref d),
            dry_run: true,
            ..
        }) if c == "台北市" && d == "大安區"
    ));
}

#[test]
fn test_expand_district_requires_city() {
    let result = Cli::try_parse_from(["cafemap", "expand", "--district", "大安區"]);
    assert!(result.is_err());
}

#[test]
fn test_expand_repeated_categories() {
    let cli = Cli::try_parse_from([
        "cafemap",
        "expand",
        "--category",
        "highRatings",
        "--category",
        "takeout",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Expand { ref categories, .. })
            if categories == &vec![Category::HighRatings, Category::Takeout]
    ));
}

#[test]
fn test_expand_rejects_unknown_category() {
    let result = Cli::try_parse_from(["cafemap", "expand", "--category", "serves_wine"]);
    assert!(result.is_err());
}
