//! Prints the hard-coded roster table from the original batch demo.

const ROSTER: [(&str, u32); 5] = [
    ("Cristiano Ronaldo", 7),
    ("Mpabbe", 10),
    ("Juan Mata", 8),
    ("Bruno Fernandez", 19),
    ("Neymar", 1),
];

fn main() {
    let rule = "-".repeat(50);

    println!("{rule}");
    println!("Roster demo");
    println!("{rule}");
    println!("{:<20} {:>13}", "Name", "Jersey Number");
    for (name, number) in ROSTER {
        println!("{name:<20} {number:>13}");
    }
    println!("{rule}");
}
