use simpleargs_parser::Args;

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let argv: Vec<&str> = argv.iter().map(String::as_str).collect();

    let mut args = match Args::try_parse(&argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = args.add_list(&["names"]) {
        eprintln!("{err}");
        std::process::exit(2);
    }

    if let Ok(Some(names)) = args.get("names") {
        if let Some(items) = names.as_list() {
            for name in items {
                println!("hello, {name:?}");
            }
        }
    }

    for (index, positional) in args.positionals().enumerate() {
        println!("argument {index}: {positional}");
    }
}
