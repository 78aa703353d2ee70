//! Compiled-in Dutch reference tables. Every initial letter has at least two entries in each
//! name table so any character mapping finds a bucket.

pub const FIRSTNAMES_MALE: &[&str] = &[
    "Aart", "Abe", "Arjen", "Bas", "Bram", "Boudewijn", "Casper", "Cornelis", "Coen", "Daan",
    "Daniel", "Dirk", "Evert", "Erik", "Egbert", "Floris", "Frank", "Frits", "Gerrit", "Gijs",
    "Govert", "Hendrik", "Hugo", "Harm", "Ivo", "Izaak", "Igor", "Jan", "Joost", "Jurrien",
    "Kees", "Koen", "Klaas", "Lucas", "Luuk", "Lars", "Maarten", "Mees", "Markus", "Niels",
    "Noud", "Nico", "Olaf", "Otto", "Okke", "Pieter", "Paul", "Pim", "Quinten", "Quirijn",
    "Ruben", "Rutger", "Roel", "Sander", "Stijn", "Sjoerd", "Teun", "Thijs", "Thomas", "Ubbo",
    "Udo", "Victor", "Vincent", "Valentijn", "Willem", "Wouter", "Wessel", "Xander", "Xavier",
    "Yannick", "Yorick", "Youri", "Zeger", "Zef", "Zeno",
];

pub const FIRSTNAMES_FEMALE: &[&str] = &[
    "Anna", "Annemarie", "Aaltje", "Bente", "Bregje", "Brechtje", "Clara", "Caroline", "Cato",
    "Daphne", "Dieuwke", "Demi", "Eva", "Esther", "Elise", "Femke", "Fleur", "Froukje", "Greet",
    "Gerda", "Gonnie", "Hanna", "Hilde", "Hester", "Ilse", "Iris", "Inge", "Janine", "Johanna",
    "Joke", "Karin", "Kim", "Koosje", "Lotte", "Lieke", "Lisanne", "Maria", "Marieke", "Mirjam",
    "Noor", "Nienke", "Nel", "Olga", "Odile", "Ottilie", "Petra", "Pien", "Paulien", "Quirine",
    "Quinty", "Renske", "Roos", "Rianne", "Sanne", "Sophie", "Saskia", "Tessa", "Tineke",
    "Trijntje", "Ursula", "Uma", "Vera", "Veerle", "Vivian", "Wilma", "Wendy", "Willemijn",
    "Xenia", "Xandra", "Yara", "Yvonne", "Ymke", "Zoë", "Zara", "Zwaantje",
];

/// `(prefix, surname)` pairs.
pub const LASTNAMES: &[(&str, &str)] = &[
    ("", "Aalbers"), ("van", "Arkel"), ("", "Bakker"), ("de", "Boer"), ("", "Claassen"),
    ("", "Cornelissen"), ("", "Dekker"), ("van", "Dijk"), ("", "Evers"), ("van", "Eck"),
    ("", "Faber"), ("", "Franken"), ("de", "Groot"), ("", "Gerritsen"), ("", "Hendriks"),
    ("", "Heijer"), ("", "Ippel"), ("van", "Iersel"), ("", "Jansen"), ("de", "Jong"),
    ("", "Kok"), ("", "Kuipers"), ("van der", "Linden"), ("", "Lammers"), ("", "Mulder"),
    ("", "Meijer"), ("", "Nguyen"), ("", "Nieuwenhuis"), ("", "Oosterhuis"), ("van", "Oort"),
    ("", "Peters"), ("", "Prins"), ("", "Quint"), ("", "Quak"), ("", "Rutten"), ("de", "Ruiter"),
    ("", "Smit"), ("", "Schouten"), ("", "Timmermans"), ("ter", "Tweel"), ("", "Uijl"),
    ("den", "Uyl"), ("", "Visser"), ("", "Vos"), ("de", "Wit"), ("", "Willems"),
    ("", "Xhofleer"), ("", "Xanten"), ("", "Ypma"), ("", "Yntema"), ("", "Zwart"),
    ("", "Zijlstra"),
];

pub const COUNTRIES: &[&str] = &[
    "Nederland", "Duitsland", "België", "Frankrijk", "Marokko", "Turkije", "Oostenrijk",
    "Indonesië", "Suriname", "Spanje", "Italië", "Polen", "Engeland", "Zwitserland",
    "Denemarken", "Zweden", "Noorwegen", "Portugal", "Griekenland", "China", "Japan", "India",
    "Canada", "Brazilië", "Curaçao", "Aruba", "Hongarije", "Roemenië", "Bulgarije", "Ierland",
];

/// `(postcode, place, street)` rows.
pub const LOCATIONS: &[(&str, &str, &str)] = &[
    ("7141DC", "Groenlo", "Parallelweg"),
    ("7521PL", "Enschede", "Waterkant"),
    ("2517AA", "Den Haag", "Laan van Meerdervoort"),
    ("2011RC", "Haarlem", "Kruisweg"),
    ("2121AB", "Bennebroek", "Binnenweg"),
    ("1012JS", "Amsterdam", "Damrak"),
    ("3011AD", "Rotterdam", "Coolsingel"),
    ("3511LX", "Utrecht", "Oudegracht"),
    ("8011CW", "Zwolle", "Melkmarkt"),
    ("2311EZ", "Leiden", "Breestraat"),
    ("6511PP", "Nijmegen", "Molenstraat"),
    ("6211CM", "Maastricht", "Grote Staat"),
    ("9711LV", "Groningen", "Herestraat"),
    ("8911BA", "Leeuwarden", "Nieuwestad"),
    ("6811BW", "Arnhem", "Jansbinnensingel"),
    ("7411HR", "Deventer", "Brink"),
    ("5038CB", "Tilburg", "Heuvelstraat"),
    ("5611EM", "Eindhoven", "Stationsweg"),
    ("4811XJ", "Breda", "Kerkplein"),
    ("2611HX", "Delft", "Oude Delft"),
    ("1811KH", "Alkmaar", "Langestraat"),
    ("7461BB", "Rijssen", "Kastanjelaan"),
    ("3811HN", "Amersfoort", "Utrechtseweg"),
    ("9401HM", "Assen", "Dorpsstraat"),
];
