//! Common PHP source fixtures for tests.

use once_cell::sync::Lazy;
use phpctx::{ParsedResolutionContext, parse_source};

/// Three brace-delimited namespace blocks declaring overlapping short names.
pub const MULTIPLE_NAMESPACES: &str = r#"<?php

namespace NamespaceA\NamespaceB
{
    use NamespaceD\ClassI;
    use NamespaceE\ClassJ as ClassK;
    use function NamespaceF\functionA;
    use const NamespaceG\CONSTANT_A;

    class ClassA extends ClassI implements InterfaceA
    {
        public function methodA()
        {
            return function () use ($x) { return new class {}; };
        }
    }

    interface InterfaceA {}

    function functionB() {}
}

namespace NamespaceC
{
    use NamespaceA\NamespaceB\ClassA;

    class ClassA extends \NamespaceA\NamespaceB\ClassA {}

    trait TraitA {}

    const CONSTANT_B = 1, CONSTANT_C = [2, 3];
}

namespace
{
    use NamespaceC\ClassA as ClassB;

    class ClassA {}

    function functionA() {}
}
"#;

/// A plain file without any namespace declaration.
pub const GLOBAL_ONLY: &str = r#"<?php
use Vendor\Package\Thing;

function helper(Thing $thing) {}
"#;

/// Source mixing inline HTML, comments, strings and heredocs with declarations.
pub const NOISY_SOURCE: &str = r#"<html><?php /* namespace Fake; */ ?>
<body>
<?php
namespace Real; // use Fake\Thing;

$text = "class NotAClass { use Nope; }";
$doc = <<<EOT
namespace Nope;
EOT;

use Real\Thing;

# const IGNORED = 1;
class Widget {}
?>
</body>
"#;

pub static MULTIPLE_NAMESPACES_PARSED: Lazy<Vec<ParsedResolutionContext>> =
    Lazy::new(|| parse_source(MULTIPLE_NAMESPACES));
