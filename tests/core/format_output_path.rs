//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use wikilist::core::format_output_path;

    #[test]
    fn as_is() {
        let final_destination = format_output_path("/home/username/data/sports.json");

        assert_eq!(final_destination, "/home/username/data/sports.json");
    }

    #[test]
    fn substitute_timestamp() {
        let final_destination = format_output_path("data/sports-%timestamp%.json");

        assert!(final_destination.starts_with("data/sports-"));
        assert!(final_destination.ends_with("Z.json"));
        assert!(!final_destination.contains("%timestamp%"));
    }

    #[test]
    fn substitute_timestamp_multi() {
        let final_destination = format_output_path("%timestamp%/%timestamp%.json");

        let (dir, file) = final_destination.split_once('/').unwrap();
        assert_eq!(file, format!("{dir}.json"));
    }

    #[test]
    fn no_colons_in_timestamp() {
        let final_destination = format_output_path("%timestamp%.json");

        assert!(!final_destination.contains(':'));
    }
}
