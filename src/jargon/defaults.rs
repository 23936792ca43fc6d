//! Default jargon for languages whose minimal program needs ceremony.

pub(super) struct DefaultJargon {
    pub ids: &'static [&'static str],
    pub text: &'static str,
    pub key: &'static str,
}

pub(super) static DEFAULTS: &[DefaultJargon] = &[
    DefaultJargon {
        ids: &["c"],
        text: "#include <stdbool.h>
#include <stdio.h>

int main(void) {
    INSERT_HERE
}",
        key: "int main(",
    },
    DefaultJargon {
        ids: &["c++"],
        text: "#include <iostream>
#include <stdio.h>
using namespace std;

int main() {
    INSERT_HERE
}",
        key: "int main(",
    },
    DefaultJargon {
        ids: &["csharp.net"],
        text: "System.Console.WriteLine(INSERT_HERE);",
        key: "Console.Write",
    },
    DefaultJargon {
        ids: &["csharp"],
        text: "namespace MyNamespace {
    class MyClass {
        static void Main(string[] args) {
            INSERT_HERE
        }
    }
}",
        key: "static void Main(",
    },
    DefaultJargon {
        ids: &["dart"],
        text: "void main() {
    INSERT_HERE
}",
        key: "void main(",
    },
    DefaultJargon {
        ids: &["go"],
        text: "package main
import \"fmt\"

func main() {
    INSERT_HERE
}",
        key: "func main(",
    },
    DefaultJargon {
        ids: &["java"],
        text: "import java.util.*;

class MyClass {
    public static void main(String[] args) {
        Scanner scanner = new Scanner(System.in);
        INSERT_HERE
    }
}",
        key: "public static void main(",
    },
    DefaultJargon {
        ids: &["kotlin"],
        text: "fun main(args : Array<String>) {
    INSERT_HERE
}",
        key: "fun main(",
    },
    DefaultJargon {
        ids: &["rust"],
        text: "fn main() {
    INSERT_HERE
}",
        key: "fn main(",
    },
    DefaultJargon {
        ids: &["scala"],
        text: "object Main extends App {
    INSERT_HERE
}",
        key: "object Main",
    },
    DefaultJargon {
        ids: &["pascal"],
        text: "program Main;
begin
    INSERT_HERE
end.",
        key: "program ",
    },
];
